//! Recipe catalog: the read-only arena of tagged recipes the scheduler draws from.
//!
//! Recipes are loaded once and never mutated. Plans borrow `&Recipe` from the catalog,
//! so the catalog must outlive any plan built from it.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::profile::DietType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Dinner,
        MealSlot::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
            MealSlot::Snack => "snack",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single catalog entry. Serialized with the short keys used by exported plans
/// (`diet`, `kcal`, `protein`, `meal`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,

    /// Diets this recipe satisfies. Inclusive: one recipe may serve several diets.
    #[serde(rename = "diet")]
    pub diet_tags: Vec<DietType>,

    #[serde(rename = "kcal")]
    pub calories: f64,

    #[serde(rename = "protein")]
    pub protein_g: f64,

    #[serde(rename = "carbs", default, skip_serializing_if = "Option::is_none")]
    pub carbs_g: Option<f64>,

    #[serde(rename = "fat", default, skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<f64>,

    pub ingredients: Vec<String>,
    pub directions: String,

    #[serde(rename = "meal")]
    pub meal_slot: MealSlot,
}

impl Recipe {
    pub fn suits(&self, diet: DietType) -> bool {
        self.diet_tags.contains(&diet)
    }

    /// One-line nutrition summary, e.g. `420 kcal • 35P / 50C / 10F`.
    /// Missing or zero carbs and fat render as an em dash.
    pub fn summary_line(&self) -> String {
        let opt = |v: Option<f64>| {
            v.filter(|g| *g != 0.0)
                .map(|g| format!("{g}"))
                .unwrap_or_else(|| "—".to_string())
        };
        format!(
            "{} kcal • {}P / {}C / {}F",
            self.calories,
            self.protein_g,
            opt(self.carbs_g),
            opt(self.fat_g)
        )
    }
}

/// Immutable recipe collection with unique ids. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

impl RecipeCatalog {
    /// Build a catalog, rejecting empty input and duplicate ids.
    pub fn new(recipes: Vec<Recipe>) -> Result<Self> {
        if recipes.is_empty() {
            return Err(PlannerError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for r in &recipes {
            if !seen.insert(r.id.as_str()) {
                return Err(PlannerError::DuplicateRecipeId(r.id.clone()));
            }
        }

        Ok(Self { recipes })
    }

    /// Load a substitute catalog from a JSON array of recipes.
    pub fn from_json(json: &str) -> Result<Self> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)?;
        Self::new(recipes)
    }

    /// The catalog shipped with the planner.
    pub fn builtin() -> Self {
        Self {
            recipes: builtin_recipes(),
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Recipes tagged for `diet`, in catalog order.
    pub fn for_diet(&self, diet: DietType) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter().filter(move |r| r.suits(diet))
    }

    /// Recipes tagged for `diet` that belong to `slot`, in catalog order.
    pub fn slot_pool(&self, diet: DietType, slot: MealSlot) -> Vec<&Recipe> {
        self.for_diet(diet).filter(|r| r.meal_slot == slot).collect()
    }

    /// Diet/slot combinations with no matching recipe. Any of these will be served by
    /// the scheduler's unconstrained fallback.
    pub fn coverage_gaps(&self) -> Vec<(DietType, MealSlot)> {
        DietType::ALL
            .iter()
            .flat_map(|&d| MealSlot::ALL.iter().map(move |&s| (d, s)))
            .filter(|&(d, s)| self.slot_pool(d, s).is_empty())
            .collect()
    }
}

impl Default for RecipeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[allow(clippy::too_many_arguments)]
fn recipe(
    id: &str,
    name: &str,
    diet: &[DietType],
    kcal: f64,
    macros: (f64, f64, f64),
    ingredients: &[&str],
    directions: &str,
    meal_slot: MealSlot,
) -> Recipe {
    let (protein, carbs, fat) = macros;
    Recipe {
        id: id.to_string(),
        name: name.to_string(),
        diet_tags: diet.to_vec(),
        calories: kcal,
        protein_g: protein,
        carbs_g: Some(carbs),
        fat_g: Some(fat),
        ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        directions: directions.to_string(),
        meal_slot,
    }
}

fn builtin_recipes() -> Vec<Recipe> {
    use DietType::*;
    use MealSlot::*;

    vec![
        // Global / Western-style
        recipe(
            "r-oats-greek",
            "Protein Overnight Oats",
            &[Balanced, HighProtein, Vegetarian],
            420.0,
            (35.0, 50.0, 10.0),
            &["Oats 60g", "Greek yogurt 200g", "Chia 10g", "Berries 100g", "Honey 1 tsp"],
            "Mix in jar, refrigerate overnight.",
            Breakfast,
        ),
        recipe(
            "r-chicken-rice",
            "Chicken, Rice & Greens",
            &[Balanced, HighProtein],
            600.0,
            (45.0, 65.0, 15.0),
            &["Chicken breast 180g", "Basmati rice 1 cup cooked", "Broccoli", "Olive oil 1 tsp"],
            "Grill chicken; steam broccoli; plate with rice.",
            Lunch,
        ),
        recipe(
            "r-tofu-rice",
            "Tofu Stir-fry + Rice",
            &[Balanced, Vegan, Vegetarian],
            520.0,
            (32.0, 70.0, 14.0),
            &["Tofu 180g", "Brown rice 1 cup cooked", "Mixed veg", "Soy sauce"],
            "Pan-fry tofu; add veg & sauce; serve over rice.",
            Dinner,
        ),
        recipe(
            "r-smoothie",
            "Protein Smoothie",
            &[Balanced, HighProtein, Vegetarian, Vegan],
            300.0,
            (30.0, 35.0, 5.0),
            &["Protein 1 scoop", "Banana", "Oats 20g", "Water or milk"],
            "Blend until smooth.",
            Snack,
        ),
        // Indian vegetarian
        recipe(
            "r-dal-roti",
            "Dal + Whole Wheat Roti",
            &[IndianVegetarian, Vegetarian, Vegan],
            520.0,
            (24.0, 80.0, 8.0),
            &["Moong dal 1.5 cup", "Whole wheat roti x2", "Salad"],
            "Cook dal with turmeric & tomato; serve with rotis and salad.",
            Lunch,
        ),
        recipe(
            "r-paneer-tikka",
            "Paneer Tikka Bowl",
            &[IndianVegetarian, Vegetarian],
            560.0,
            (38.0, 55.0, 18.0),
            &["Paneer 150g", "Brown rice 1 cup", "Peppers", "Yogurt marinade"],
            "Marinate paneer & roast with peppers; serve over rice.",
            Lunch,
        ),
        recipe(
            "r-poha",
            "Vegetable Poha",
            &[IndianVegetarian, Vegetarian, Vegan],
            360.0,
            (10.0, 60.0, 8.0),
            &["Poha 1.5 cups", "Peanuts", "Turmeric", "Onion", "Coriander"],
            "Rinse poha; temper mustard seeds; toss with veg and peanuts.",
            Breakfast,
        ),
        recipe(
            "r-upma",
            "Semolina Upma with Veg",
            &[IndianVegetarian, Vegetarian, Vegan],
            380.0,
            (12.0, 62.0, 9.0),
            &["Rava 3/4 cup", "Mixed vegetables", "Mustard seeds", "Lime"],
            "Roast rava; cook with tempered spices and veg.",
            Breakfast,
        ),
        recipe(
            "r-chana-rice",
            "Chana Masala + Brown Rice",
            &[IndianVegetarian, Vegan],
            520.0,
            (18.0, 85.0, 10.0),
            &["Chana 1 cup cooked", "Brown rice 1 cup", "Onion", "Tomato", "Spices"],
            "Cook chana with tomatoes & spices; serve with rice.",
            Lunch,
        ),
        recipe(
            "r-dosa-coconut",
            "Dosa + Coconut Chutney",
            &[IndianVegetarian, Vegetarian, Vegan],
            430.0,
            (8.0, 70.0, 8.0),
            &["Dosa batter 1 cup", "Coconut chutney", "Sambar"],
            "Spread batter thin on pan; serve with chutney & sambar.",
            Breakfast,
        ),
        recipe(
            "r-roasted-makhana",
            "Roasted Makhana Snack",
            &[IndianVegetarian, Vegetarian, Vegan],
            120.0,
            (4.0, 12.0, 6.0),
            &["Makhana 30g", "Salt", "Pepper"],
            "Roast makhana in ghee or oil with spices.",
            Snack,
        ),
        recipe(
            "r-dhokla",
            "Besan Dhokla",
            &[IndianVegetarian, Vegetarian, Vegan],
            200.0,
            (8.0, 30.0, 6.0),
            &["Besan 1 cup", "Yogurt or vegan yogurt", "Mustard seeds"],
            "Prepare batter; steam in tray; temper and serve.",
            Snack,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_ids_unique() {
        let catalog = RecipeCatalog::builtin();
        assert_eq!(catalog.len(), 12);
        assert!(RecipeCatalog::new(catalog.recipes().to_vec()).is_ok());
    }

    #[test]
    fn test_diet_tags_are_inclusive() {
        let catalog = RecipeCatalog::builtin();
        let tofu = catalog.get("r-tofu-rice").unwrap();
        assert!(tofu.suits(DietType::Vegan));
        assert!(tofu.suits(DietType::Vegetarian));
        assert!(tofu.suits(DietType::Balanced));
        assert!(!tofu.suits(DietType::Keto));
    }

    #[test]
    fn test_slot_pool_keeps_catalog_order() {
        let catalog = RecipeCatalog::builtin();
        let ids: Vec<&str> = catalog
            .slot_pool(DietType::IndianVegetarian, MealSlot::Breakfast)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["r-poha", "r-upma", "r-dosa-coconut"]);
    }

    #[test]
    fn test_coverage_gaps_flag_missing_slots() {
        let gaps = RecipeCatalog::builtin().coverage_gaps();
        assert!(gaps.contains(&(DietType::IndianVegetarian, MealSlot::Dinner)));
        assert!(gaps.contains(&(DietType::HighProtein, MealSlot::Dinner)));
        for slot in MealSlot::ALL {
            assert!(gaps.contains(&(DietType::Keto, slot)));
        }
        assert!(!gaps.contains(&(DietType::Balanced, MealSlot::Dinner)));
    }

    #[test]
    fn test_new_rejects_empty_and_duplicates() {
        assert!(matches!(RecipeCatalog::new(vec![]), Err(PlannerError::EmptyCatalog)));

        let r = RecipeCatalog::builtin().recipes()[0].clone();
        let err = RecipeCatalog::new(vec![r.clone(), r]).unwrap_err();
        assert!(matches!(err, PlannerError::DuplicateRecipeId(id) if id == "r-oats-greek"));
    }

    #[test]
    fn test_from_json_with_missing_macros() {
        let json = r#"[
            {"id":"k-eggs","name":"Eggs & Avocado","diet":["keto"],"kcal":450,"protein":22,
             "fat":36,"ingredients":["Eggs x3","Avocado"],"directions":"Scramble.","meal":"breakfast"}
        ]"#;
        let catalog = RecipeCatalog::from_json(json).unwrap();
        let r = catalog.get("k-eggs").unwrap();
        assert_eq!(r.carbs_g, None);
        assert_eq!(r.fat_g, Some(36.0));
        assert_eq!(r.summary_line(), "450 kcal • 22P / —C / 36F");

        let mut zero_fat = r.clone();
        zero_fat.fat_g = Some(0.0);
        assert_eq!(zero_fat.summary_line(), "450 kcal • 22P / —C / —F");
    }

    #[test]
    fn test_from_json_rejects_unknown_diet() {
        let json = r#"[{"id":"x","name":"x","diet":["paleo"],"kcal":1,"protein":1,
            "ingredients":[],"directions":"","meal":"lunch"}]"#;
        assert!(matches!(RecipeCatalog::from_json(json), Err(PlannerError::Json(_))));
    }
}
