//! Meal scheduler: deterministic 7-day recipe rotation over a diet-filtered catalog.
//!
//! Selection rule for day `d` and slot position `i`:
//! `slot_pool[(d + i) % slot_pool.len()]`, where `slot_pool` is the recipes tagged for
//! the diet and belonging to the slot. When that pool is empty the pick comes from the
//! whole catalog with the same index, ignoring diet and slot. That fallback is kept on
//! purpose (the curated catalog is expected to avoid it) but every occurrence is logged
//! and flagged on the assignment.

use tracing::warn;

use crate::catalog::{MealSlot, Recipe, RecipeCatalog};
use crate::profile::{DietType, MealsPerDay};

pub const DAYS_PER_WEEK: usize = 7;

const THREE_MEALS: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];
const FOUR_MEALS: [MealSlot; 4] = [
    MealSlot::Breakfast,
    MealSlot::Lunch,
    MealSlot::Dinner,
    MealSlot::Snack,
];

/// Fixed slot order for a given number of meals.
pub fn slot_order(meals_per_day: MealsPerDay) -> &'static [MealSlot] {
    match meals_per_day {
        MealsPerDay::Three => &THREE_MEALS,
        MealsPerDay::Four => &FOUR_MEALS,
    }
}

/// One scheduled meal. `slot` is the slot it was scheduled into, which can differ from
/// `recipe.meal_slot` when `fallback` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MealAssignment<'a> {
    pub slot: MealSlot,
    pub recipe: &'a Recipe,
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan<'a> {
    /// 0-based day index.
    pub day: usize,
    pub meals: Vec<MealAssignment<'a>>,
}

impl<'a> DayPlan<'a> {
    pub fn recipes(&self) -> impl Iterator<Item = &'a Recipe> + '_ {
        self.meals.iter().map(|m| m.recipe)
    }

    pub fn recipe_ids(&self) -> Vec<&'a str> {
        self.meals.iter().map(|m| m.recipe.id.as_str()).collect()
    }

    /// Sum of recipe calories for the day.
    pub fn calories(&self) -> f64 {
        self.recipes().map(|r| r.calories).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyPlan<'a> {
    pub diet: DietType,
    pub meals_per_day: MealsPerDay,
    pub days: Vec<DayPlan<'a>>,
}

impl<'a> WeeklyPlan<'a> {
    /// Recipe ids as a day-major grid.
    pub fn recipe_ids(&self) -> Vec<Vec<&'a str>> {
        self.days.iter().map(DayPlan::recipe_ids).collect()
    }

    /// Number of slots that were filled by the unconstrained fallback.
    pub fn fallback_count(&self) -> usize {
        self.days
            .iter()
            .flat_map(|d| d.meals.iter())
            .filter(|m| m.fallback)
            .count()
    }
}

/// Builds weekly plans from a borrowed catalog.
#[derive(Debug, Clone, Copy)]
pub struct MealScheduler<'a> {
    catalog: &'a RecipeCatalog,
}

impl<'a> MealScheduler<'a> {
    pub fn new(catalog: &'a RecipeCatalog) -> Self {
        Self { catalog }
    }

    pub fn build_week(&self, diet: DietType, meals_per_day: MealsPerDay) -> WeeklyPlan<'a> {
        let slots = slot_order(meals_per_day);
        let pools: Vec<Vec<&'a Recipe>> = slots
            .iter()
            .map(|&slot| self.catalog.slot_pool(diet, slot))
            .collect();
        let all = self.catalog.recipes();

        let days = (0..DAYS_PER_WEEK)
            .map(|d| {
                let meals = slots
                    .iter()
                    .zip(&pools)
                    .enumerate()
                    .map(|(i, (&slot, pool))| {
                        let idx = d + i;
                        if pool.is_empty() {
                            let recipe = &all[idx % all.len()];
                            warn!(
                                diet = %diet,
                                slot = %slot,
                                day = d,
                                recipe_id = %recipe.id,
                                "no recipe for diet and slot; using unconstrained catalog entry"
                            );
                            MealAssignment {
                                slot,
                                recipe,
                                fallback: true,
                            }
                        } else {
                            MealAssignment {
                                slot,
                                recipe: pool[idx % pool.len()],
                                fallback: false,
                            }
                        }
                    })
                    .collect();
                DayPlan { day: d, meals }
            })
            .collect();

        WeeklyPlan {
            diet,
            meals_per_day,
            days,
        }
    }
}

/// Convenience wrapper around [`MealScheduler::build_week`].
pub fn build_week(
    catalog: &RecipeCatalog,
    diet: DietType,
    meals_per_day: MealsPerDay,
) -> WeeklyPlan<'_> {
    MealScheduler::new(catalog).build_week(diet, meals_per_day)
}
