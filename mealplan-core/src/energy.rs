//! Energy model: BMR (Mifflin-St Jeor), TDEE and the goal-adjusted calorie target.
//!
//! All functions are pure and infallible. Nothing is clamped or rounded here: extreme
//! inputs can produce a negative BMR and non-finite inputs produce non-finite outputs.
//! Rounding belongs to the display/export layer.

use serde::{Deserialize, Serialize};

use crate::profile::{ActivityLevel, Goal, Sex, UserProfile};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyEstimate {
    /// kcal/day at rest.
    pub bmr: f64,
    /// kcal/day including activity.
    pub tdee: f64,
    /// kcal/day after the goal adjustment.
    pub calorie_target: f64,
}

pub fn compute_energy(profile: &UserProfile) -> EnergyEstimate {
    let bmr = mifflin_st_jeor(
        profile.sex,
        profile.weight_kg,
        profile.height_cm,
        profile.age as f64,
    );
    let tdee = bmr * activity_factor(profile.activity);
    let calorie_target = tdee * goal_multiplier(profile.goal);

    EnergyEstimate {
        bmr,
        tdee,
        calorie_target,
    }
}

pub fn mifflin_st_jeor(sex: Sex, weight_kg: f64, height_cm: f64, age: f64) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age;
    match sex {
        Sex::Male => base + 5.0,
        Sex::Other => base - 161.0,
    }
}

pub fn activity_factor(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Active => 1.725,
        ActivityLevel::Very => 1.9,
    }
}

pub fn goal_multiplier(goal: Goal) -> f64 {
    match goal {
        Goal::FatLoss => 0.8,
        Goal::MuscleGain => 1.15,
        Goal::Endurance => 1.05,
        Goal::Maintenance => 1.0,
    }
}
