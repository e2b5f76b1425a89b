//! JSON export document and export file naming.
//!
//! This is the only place numbers get rounded: `bmr`, `tdee` and `calories` are whole
//! kcal in the export, while `macros` keeps the unrounded gram targets.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::Recipe;
use crate::error::{PlannerError, Result};
use crate::macros::MacroTargets;
use crate::plan::ExportablePlan;
use crate::profile::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// `plan_<name>.<ext>`, with "user" standing in for a blank name. Path separators in
/// the name are replaced so the result is always a single file name.
pub fn export_file_name(name: &str, format: ExportFormat) -> String {
    let name = name.trim();
    let stem = if name.is_empty() {
        "user".to_string()
    } else {
        name.replace(['/', '\\'], "_")
    };
    format!("plan_{stem}.{}", format.extension())
}

/// Half-up rounding to whole kcal, matching the planner's display.
pub fn round_kcal(kcal: f64) -> f64 {
    (kcal + 0.5).floor()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetrics {
    pub bmr: f64,
    pub tdee: f64,
    pub calories: f64,
    pub macros: MacroTargets,
}

/// `{ user, metrics: { bmr, tdee, calories, macros }, meals }`.
///
/// Round-trips through JSON as long as the targets are finite; serde_json writes
/// non-finite floats as `null`, which does not parse back into a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonExport {
    pub user: UserProfile,
    pub metrics: ExportMetrics,
    pub meals: Vec<Vec<Recipe>>,
}

impl JsonExport {
    pub fn from_plan(plan: &ExportablePlan<'_>) -> Self {
        let t = &plan.targets;
        Self {
            user: plan.profile.clone(),
            metrics: ExportMetrics {
                bmr: round_kcal(t.bmr),
                tdee: round_kcal(t.tdee),
                calories: round_kcal(t.calorie_target),
                macros: t.macros(),
            },
            meals: plan
                .plan
                .days
                .iter()
                .map(|day| day.recipes().cloned().collect())
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn meal_ids(&self) -> Vec<Vec<&str>> {
        self.meals
            .iter()
            .map(|day| day.iter().map(|r| r.id.as_str()).collect())
            .collect()
    }

    pub fn file_name(&self) -> String {
        export_file_name(&self.user.name, ExportFormat::Json)
    }
}

/// Write the JSON export for `plan` into `dir` and return the file path.
///
/// The document is written to a sibling temp file first and renamed into place, so a
/// failed write never leaves a truncated export behind.
pub fn write_json_export(plan: &ExportablePlan<'_>, dir: &Path) -> Result<PathBuf> {
    let doc = JsonExport::from_plan(plan);
    let json = doc.to_json_pretty()?;

    let path = dir.join(doc.file_name());
    let tmp = dir.join(format!(".{}.tmp", doc.file_name()));

    let io_err = |source: std::io::Error| PlannerError::Export {
        path: path.clone(),
        source,
    };

    fs::write(&tmp, json.as_bytes()).map_err(io_err)?;
    if let Err(e) = fs::rename(&tmp, &path) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(e));
    }

    info!(path = %path.display(), days = doc.meals.len(), "wrote plan export");
    Ok(path)
}
