//! Macro allocation: protein by body weight, fat by calorie share, carbs take the rest.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::export::round_kcal;
use crate::profile::Goal;

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARB: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Preferred protein source. Only affects the advisory note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProteinPreference {
    Plant,
    Animal,
    #[default]
    Mixed,
}

impl ProteinPreference {
    pub fn note(&self) -> &'static str {
        match self {
            ProteinPreference::Plant => "Prioritize tofu, tempeh, legumes, seitan.",
            ProteinPreference::Animal => "Lean poultry, fish, eggs, dairy.",
            ProteinPreference::Mixed => "Mix plant and animal proteins.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProteinPreference::Plant => "plant",
            ProteinPreference::Animal => "animal",
            ProteinPreference::Mixed => "mixed",
        }
    }
}

impl FromStr for ProteinPreference {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "plant" => Ok(ProteinPreference::Plant),
            "animal" => Ok(ProteinPreference::Animal),
            "mixed" => Ok(ProteinPreference::Mixed),
            other => Err(PlannerError::InvalidField {
                field: "proteinPref",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ProteinPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Daily gram targets. Serialized as `proteinG`, `carbsG`, `fatG`, `proteinNote`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroTargets {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub protein_note: String,
}

impl MacroTargets {
    /// Rounded grams in chart order: Protein, Carbs, Fat. Same half-up rule as the
    /// exported kcal figures.
    pub fn chart_breakdown(&self) -> [(&'static str, i64); 3] {
        [
            ("Protein", round_kcal(self.protein_g) as i64),
            ("Carbs", round_kcal(self.carbs_g) as i64),
            ("Fat", round_kcal(self.fat_g) as i64),
        ]
    }

    pub fn total_kcal(&self) -> f64 {
        self.protein_g * KCAL_PER_G_PROTEIN
            + self.carbs_g * KCAL_PER_G_CARB
            + self.fat_g * KCAL_PER_G_FAT
    }
}

/// Grams of protein per kg of body weight.
pub fn protein_per_kg(goal: Goal) -> f64 {
    match goal {
        Goal::MuscleGain => 2.0,
        Goal::FatLoss => 1.8,
        _ => 1.6,
    }
}

/// Share of total calories assigned to fat.
pub fn fat_share(goal: Goal) -> f64 {
    match goal {
        Goal::Endurance => 0.20,
        _ => 0.25,
    }
}

pub fn compute_macros(
    calorie_target: f64,
    weight_kg: f64,
    goal: Goal,
    preference: ProteinPreference,
) -> MacroTargets {
    let protein_g = protein_per_kg(goal) * weight_kg;

    let fat_kcal = calorie_target * fat_share(goal);
    let fat_g = fat_kcal / KCAL_PER_G_FAT;

    // Carbs never go negative when protein + fat already exceed the target.
    let carb_kcal = (calorie_target - protein_g * KCAL_PER_G_PROTEIN - fat_kcal).max(0.0);
    let carbs_g = carb_kcal / KCAL_PER_G_CARB;

    MacroTargets {
        protein_g,
        carbs_g,
        fat_g,
        protein_note: preference.note().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muscle_gain_split() {
        let m = compute_macros(2800.0, 75.0, Goal::MuscleGain, ProteinPreference::Mixed);
        assert_eq!(m.protein_g, 150.0);
        assert!((m.fat_g - 700.0 / 9.0).abs() < 1e-9);
        // 2800 - 600 - 700 = 1500 kcal of carbs
        assert!((m.carbs_g - 375.0).abs() < 1e-9);
        assert_eq!(m.protein_note, "Mix plant and animal proteins.");
    }

    #[test]
    fn test_protein_density_and_fat_share_by_goal() {
        assert_eq!(protein_per_kg(Goal::MuscleGain), 2.0);
        assert_eq!(protein_per_kg(Goal::FatLoss), 1.8);
        assert_eq!(protein_per_kg(Goal::Endurance), 1.6);
        assert_eq!(protein_per_kg(Goal::Maintenance), 1.6);
        assert_eq!(fat_share(Goal::Endurance), 0.20);
        assert_eq!(fat_share(Goal::FatLoss), 0.25);
    }

    #[test]
    fn test_energy_never_exceeds_target_when_carbs_positive() {
        for goal in Goal::ALL {
            let target = 2400.0;
            let m = compute_macros(target, 70.0, goal, ProteinPreference::default());
            assert!(m.carbs_g > 0.0);
            assert!(m.total_kcal() <= target + 1e-9);
        }
    }

    #[test]
    fn test_carbs_floor_at_zero() {
        // 150 kg at 2.0 g/kg = 1200 kcal protein alone against a 1000 kcal target.
        let m = compute_macros(1000.0, 150.0, Goal::MuscleGain, ProteinPreference::Plant);
        assert_eq!(m.carbs_g, 0.0);
        assert_eq!(m.protein_note, "Prioritize tofu, tempeh, legumes, seitan.");
    }

    #[test]
    fn test_chart_breakdown_rounds() {
        let m = MacroTargets {
            protein_g: 150.4,
            carbs_g: 374.5,
            fat_g: 77.77,
            protein_note: String::new(),
        };
        assert_eq!(m.chart_breakdown(), [("Protein", 150), ("Carbs", 375), ("Fat", 78)]);

        let negative = MacroTargets {
            protein_g: -2.5,
            ..m
        };
        assert_eq!(negative.chart_breakdown()[0], ("Protein", -2));
    }

    #[test]
    fn test_preference_parse() {
        assert_eq!("animal".parse::<ProteinPreference>().unwrap(), ProteinPreference::Animal);
        assert_eq!(ProteinPreference::default(), ProteinPreference::Mixed);
        assert!("fish".parse::<ProteinPreference>().is_err());
    }
}
