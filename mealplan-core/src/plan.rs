//! Plan assembly: energy + macros + weekly schedule for one profile snapshot.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::RecipeCatalog;
use crate::energy::compute_energy;
use crate::macros::{compute_macros, MacroTargets, ProteinPreference};
use crate::profile::UserProfile;
use crate::scheduler::{MealScheduler, WeeklyPlan};

/// Unrounded daily targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTargets {
    pub bmr: f64,
    pub tdee: f64,
    pub calorie_target: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub protein_note: String,
}

impl NutritionTargets {
    pub fn macros(&self) -> MacroTargets {
        MacroTargets {
            protein_g: self.protein_g,
            carbs_g: self.carbs_g,
            fat_g: self.fat_g,
            protein_note: self.protein_note.clone(),
        }
    }
}

/// Everything handed to export and presentation collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportablePlan<'a> {
    pub profile: UserProfile,
    pub targets: NutritionTargets,
    pub plan: WeeklyPlan<'a>,
}

/// Targets only; the schedule does not depend on them.
pub fn compute_targets(profile: &UserProfile, preference: ProteinPreference) -> NutritionTargets {
    let energy = compute_energy(profile);
    let macros = compute_macros(energy.calorie_target, profile.weight_kg, profile.goal, preference);

    NutritionTargets {
        bmr: energy.bmr,
        tdee: energy.tdee,
        calorie_target: energy.calorie_target,
        protein_g: macros.protein_g,
        carbs_g: macros.carbs_g,
        fat_g: macros.fat_g,
        protein_note: macros.protein_note,
    }
}

/// Assemble with the default (mixed) protein preference.
pub fn assemble<'a>(profile: &UserProfile, catalog: &'a RecipeCatalog) -> ExportablePlan<'a> {
    assemble_with_preference(profile, catalog, ProteinPreference::default())
}

pub fn assemble_with_preference<'a>(
    profile: &UserProfile,
    catalog: &'a RecipeCatalog,
    preference: ProteinPreference,
) -> ExportablePlan<'a> {
    let targets = compute_targets(profile, preference);
    let plan = MealScheduler::new(catalog).build_week(profile.diet_type, profile.meals_per_day);

    debug!(
        bmr = targets.bmr,
        tdee = targets.tdee,
        calories = targets.calorie_target,
        protein_g = targets.protein_g,
        carbs_g = targets.carbs_g,
        fat_g = targets.fat_g,
        diet = %profile.diet_type,
        fallbacks = plan.fallback_count(),
        "assembled plan"
    );

    ExportablePlan {
        profile: profile.clone(),
        targets,
        plan,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{DietType, Goal, MealsPerDay};
    use crate::scheduler::build_week;

    #[test]
    fn test_assemble_default_profile() {
        let catalog = RecipeCatalog::builtin();
        let profile = UserProfile::default();
        let out = assemble(&profile, &catalog);

        assert!((out.targets.bmr - 1592.75).abs() < 1e-9);
        assert!((out.targets.tdee - 1592.75 * 1.55).abs() < 1e-9);
        assert!((out.targets.calorie_target - 1592.75 * 1.55 * 1.15).abs() < 1e-9);
        assert_eq!(out.targets.protein_g, 150.0);
        assert_eq!(out.targets.protein_note, "Mix plant and animal proteins.");
        assert_eq!(out.plan.days.len(), 7);
        assert_eq!(out.plan.days[0].meals.len(), 4);
        assert_eq!(out.profile, profile);
    }

    #[test]
    fn test_schedule_independent_of_targets() {
        let catalog = RecipeCatalog::builtin();
        let lean = UserProfile::default()
            .with_goal(Goal::FatLoss)
            .with_diet(DietType::Vegan, MealsPerDay::Three);
        let heavy = lean.clone().with_goal(Goal::MuscleGain);

        let a = assemble(&lean, &catalog);
        let b = assemble(&heavy, &catalog);
        assert_ne!(a.targets, b.targets);
        assert_eq!(a.plan, b.plan);
        assert_eq!(a.plan, build_week(&catalog, DietType::Vegan, MealsPerDay::Three));
    }

    #[test]
    fn test_preference_changes_note_only() {
        let catalog = RecipeCatalog::builtin();
        let profile = UserProfile::default();
        let mixed = assemble(&profile, &catalog);
        let plant = assemble_with_preference(&profile, &catalog, ProteinPreference::Plant);
        assert_eq!(mixed.targets.protein_g, plant.targets.protein_g);
        assert_eq!(plant.targets.protein_note, "Prioritize tofu, tempeh, legumes, seitan.");
        assert_eq!(plant.targets.macros().protein_note, plant.targets.protein_note);
    }
}
