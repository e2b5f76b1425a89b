//! Plain-text rendering of targets and weekly plans for the terminal.

use mealplan_core::{round_kcal, ExportablePlan, NutritionTargets, RecipeCatalog, WeeklyPlan};

pub fn render_targets(t: &NutritionTargets) -> String {
    let mut out = String::new();
    out.push_str(&format!("BMR: {} kcal\n", round_kcal(t.bmr)));
    out.push_str(&format!("TDEE: {} kcal\n", round_kcal(t.tdee)));
    out.push_str(&format!("Calories: {} kcal\n", round_kcal(t.calorie_target)));
    for (label, grams) in t.macros().chart_breakdown() {
        out.push_str(&format!("{label}: {grams} g\n"));
    }
    out.push_str(&format!("Note: {}\n", t.protein_note));
    out
}

pub fn render_week(week: &WeeklyPlan<'_>) -> String {
    let mut out = String::new();
    for day in &week.days {
        out.push_str(&format!("Day {} ({} kcal)\n", day.day + 1, day.calories()));
        for m in &day.meals {
            let marker = if m.fallback { " [fallback]" } else { "" };
            out.push_str(&format!(
                "  {} • {} | {}{}\n",
                m.slot,
                m.recipe.name,
                m.recipe.summary_line(),
                marker
            ));
        }
    }
    let fallbacks = week.fallback_count();
    if fallbacks > 0 {
        out.push_str(&format!(
            "\n{fallbacks} slot(s) had no {} recipe and used the unconstrained catalog.\n",
            week.diet
        ));
    }
    out
}

pub fn render_plan(plan: &ExportablePlan<'_>) -> String {
    format!("{}\n{}", render_targets(&plan.targets), render_week(&plan.plan))
}

pub fn render_coverage(catalog: &RecipeCatalog) -> String {
    let gaps = catalog.coverage_gaps();
    if gaps.is_empty() {
        return format!("All diets covered for every slot ({} recipes).\n", catalog.len());
    }
    let mut out = format!("{} diet/slot gap(s) in {} recipes:\n", gaps.len(), catalog.len());
    for (diet, slot) in gaps {
        out.push_str(&format!("- {diet}: {slot}\n"));
    }
    out
}
