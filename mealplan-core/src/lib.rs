//! mealplan-core: nutrition targets and deterministic weekly meal plans.
//!
//! Pipeline: [`UserProfile`] → [`compute_energy`] → [`compute_macros`], and independently
//! [`MealScheduler::build_week`] over an injected [`RecipeCatalog`]. [`assemble`] merges
//! both into an [`ExportablePlan`], the unit handed to export collaborators.

pub mod catalog;
pub mod energy;
pub mod error;
pub mod export;
pub mod macros;
pub mod plan;
pub mod profile;
pub mod scheduler;

pub use catalog::{MealSlot, Recipe, RecipeCatalog};
pub use energy::{
    activity_factor, compute_energy, goal_multiplier, mifflin_st_jeor, EnergyEstimate,
};
pub use error::{PlannerError, Result};
pub use export::{
    export_file_name, round_kcal, write_json_export, ExportFormat, ExportMetrics, JsonExport,
};
pub use macros::{compute_macros, MacroTargets, ProteinPreference};
pub use plan::{
    assemble, assemble_with_preference, compute_targets, ExportablePlan, NutritionTargets,
};
pub use profile::{
    coerce_number, ActivityLevel, DietType, Goal, MealsPerDay, ProfileForm, Sex, UserProfile,
};
pub use scheduler::{
    build_week, slot_order, DayPlan, MealAssignment, MealScheduler, WeeklyPlan, DAYS_PER_WEEK,
};
