//! User profile: the immutable snapshot of anthropometric inputs fed into the pipeline.
//!
//! Field and enum spellings match the planner form (`heightCm`, `dietType`,
//! `indian_vegetarian`, ...) so a serialized profile can be read back by the same
//! collaborators that produced it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Other,
}

impl Sex {
    /// The form only distinguishes "male"; every other value takes the non-male offset.
    pub fn from_form(raw: &str) -> Self {
        if raw == "male" { Sex::Male } else { Sex::Other }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    Very,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::Very,
    ];

    /// Lenient parse used for form input: unknown labels fall back to moderate.
    pub fn from_form(raw: &str) -> Self {
        raw.parse().unwrap_or(ActivityLevel::Moderate)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::Very => "very",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    FatLoss,
    MuscleGain,
    Endurance,
    Maintenance,
}

impl Goal {
    pub const ALL: [Goal; 4] = [Goal::FatLoss, Goal::MuscleGain, Goal::Endurance, Goal::Maintenance];

    /// Lenient parse used for form input: unknown goals are treated as maintenance.
    pub fn from_form(raw: &str) -> Self {
        raw.parse().unwrap_or(Goal::Maintenance)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::FatLoss => "fat_loss",
            Goal::MuscleGain => "muscle_gain",
            Goal::Endurance => "endurance",
            Goal::Maintenance => "maintenance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    Balanced,
    HighProtein,
    Keto,
    Vegetarian,
    Vegan,
    IndianVegetarian,
}

impl DietType {
    pub const ALL: [DietType; 6] = [
        DietType::Balanced,
        DietType::HighProtein,
        DietType::Keto,
        DietType::Vegetarian,
        DietType::Vegan,
        DietType::IndianVegetarian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DietType::Balanced => "balanced",
            DietType::HighProtein => "high_protein",
            DietType::Keto => "keto",
            DietType::Vegetarian => "vegetarian",
            DietType::Vegan => "vegan",
            DietType::IndianVegetarian => "indian_vegetarian",
        }
    }
}

/// Meals per day. Only 3 and 4 are supported; serialized as a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MealsPerDay {
    Three,
    Four,
}

impl MealsPerDay {
    pub fn count(&self) -> usize {
        match self {
            MealsPerDay::Three => 3,
            MealsPerDay::Four => 4,
        }
    }
}

impl TryFrom<u8> for MealsPerDay {
    type Error = PlannerError;

    fn try_from(n: u8) -> Result<Self> {
        match n {
            3 => Ok(MealsPerDay::Three),
            4 => Ok(MealsPerDay::Four),
            other => Err(PlannerError::invalid("mealsPerDay", other.to_string())),
        }
    }
}

impl From<MealsPerDay> for u8 {
    fn from(m: MealsPerDay) -> u8 {
        m.count() as u8
    }
}

macro_rules! label_impls {
    ($ty:ty, $err:expr) => {
        impl FromStr for $ty {
            type Err = PlannerError;

            fn from_str(s: &str) -> Result<Self> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| ($err)(s))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

label_impls!(ActivityLevel, |s: &str| PlannerError::invalid("activity", s));
label_impls!(Goal, |s: &str| PlannerError::invalid("goal", s));
label_impls!(DietType, |s: &str| PlannerError::UnknownDiet(s.to_string()));

impl FromStr for Sex {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "male" => Ok(Sex::Male),
            "other" | "female" => Ok(Sex::Other),
            other => Err(PlannerError::invalid("sex", other)),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable snapshot of the user's inputs for one computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity: ActivityLevel,
    pub goal: Goal,
    pub diet_type: DietType,
    pub meals_per_day: MealsPerDay,
}

impl Default for UserProfile {
    /// The planner's initial form state.
    fn default() -> Self {
        Self {
            name: String::new(),
            age: 30,
            sex: Sex::Male,
            height_cm: 175.0,
            weight_kg: 75.0,
            activity: ActivityLevel::Moderate,
            goal: Goal::MuscleGain,
            diet_type: DietType::IndianVegetarian,
            meals_per_day: MealsPerDay::Four,
        }
    }
}

impl UserProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, age: u32, sex: Sex, height_cm: f64, weight_kg: f64) -> Self {
        self.age = age;
        self.sex = sex;
        self.height_cm = height_cm;
        self.weight_kg = weight_kg;
        self
    }

    pub fn with_activity(mut self, activity: ActivityLevel) -> Self {
        self.activity = activity;
        self
    }

    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_diet(mut self, diet_type: DietType, meals_per_day: MealsPerDay) -> Self {
        self.diet_type = diet_type;
        self.meals_per_day = meals_per_day;
        self
    }
}

/// Raw form fields, as text, before coercion into a [`UserProfile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileForm {
    pub name: String,
    pub age: String,
    pub sex: String,
    pub height_cm: String,
    pub weight_kg: String,
    pub activity: String,
    pub goal: String,
    pub diet_type: String,
    pub meals_per_day: String,
}

impl From<&UserProfile> for ProfileForm {
    fn from(p: &UserProfile) -> Self {
        Self {
            name: p.name.clone(),
            age: p.age.to_string(),
            sex: p.sex.to_string(),
            height_cm: p.height_cm.to_string(),
            weight_kg: p.weight_kg.to_string(),
            activity: p.activity.to_string(),
            goal: p.goal.to_string(),
            diet_type: p.diet_type.to_string(),
            meals_per_day: p.meals_per_day.count().to_string(),
        }
    }
}

impl ProfileForm {
    /// Coerce the raw fields the way the form does: numbers are parsed leniently
    /// (blank is 0, garbage is NaN) and unknown activity/goal labels fall back to
    /// their defaults. Diet type and meals per day must be valid.
    pub fn coerce(&self) -> Result<UserProfile> {
        let age = coerce_number(&self.age);
        if !age.is_finite() || age < 0.0 || age > f64::from(u32::MAX) {
            return Err(PlannerError::invalid("age", self.age.as_str()));
        }

        let meals = coerce_number(&self.meals_per_day);
        let meals_per_day = if meals == 3.0 {
            MealsPerDay::Three
        } else if meals == 4.0 {
            MealsPerDay::Four
        } else {
            return Err(PlannerError::invalid("mealsPerDay", self.meals_per_day.as_str()));
        };

        Ok(UserProfile {
            name: self.name.clone(),
            age: age as u32,
            sex: Sex::from_form(self.sex.trim()),
            height_cm: coerce_number(&self.height_cm),
            weight_kg: coerce_number(&self.weight_kg),
            activity: ActivityLevel::from_form(&self.activity),
            goal: Goal::from_form(&self.goal),
            diet_type: self.diet_type.parse()?,
            meals_per_day,
        })
    }
}

/// Number-like coercion: surrounding whitespace ignored, empty is 0, unparseable is NaN.
pub fn coerce_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProfileForm {
        ProfileForm {
            name: "Asha".into(),
            age: "30".into(),
            sex: "female".into(),
            height_cm: "162".into(),
            weight_kg: "58.5".into(),
            activity: "light".into(),
            goal: "fat_loss".into(),
            diet_type: "vegan".into(),
            meals_per_day: "3".into(),
        }
    }

    #[test]
    fn test_default_profile_matches_planner_form() {
        let p = UserProfile::default();
        assert_eq!(p.age, 30);
        assert_eq!(p.sex, Sex::Male);
        assert_eq!(p.height_cm, 175.0);
        assert_eq!(p.weight_kg, 75.0);
        assert_eq!(p.activity, ActivityLevel::Moderate);
        assert_eq!(p.goal, Goal::MuscleGain);
        assert_eq!(p.diet_type, DietType::IndianVegetarian);
        assert_eq!(p.meals_per_day, MealsPerDay::Four);
    }

    #[test]
    fn test_coerce_form() {
        let p = form().coerce().unwrap();
        assert_eq!(p.name, "Asha");
        assert_eq!(p.sex, Sex::Other);
        assert_eq!(p.weight_kg, 58.5);
        assert_eq!(p.activity, ActivityLevel::Light);
        assert_eq!(p.goal, Goal::FatLoss);
        assert_eq!(p.diet_type, DietType::Vegan);
        assert_eq!(p.meals_per_day, MealsPerDay::Three);
    }

    #[test]
    fn test_coerce_lenient_fallbacks() {
        let mut f = form();
        f.activity = "couch".into();
        f.goal = "bulk".into();
        f.sex = "MALE".into();
        f.height_cm = "".into();
        f.weight_kg = "heavy".into();

        let p = f.coerce().unwrap();
        assert_eq!(p.activity, ActivityLevel::Moderate);
        assert_eq!(p.goal, Goal::Maintenance);
        // Only the exact literal counts as male.
        assert_eq!(p.sex, Sex::Other);
        assert_eq!(p.height_cm, 0.0);
        assert!(p.weight_kg.is_nan());
    }

    #[test]
    fn test_coerce_rejects_bad_diet_and_meals() {
        let mut f = form();
        f.diet_type = "paleo".into();
        assert!(matches!(f.coerce(), Err(PlannerError::UnknownDiet(d)) if d == "paleo"));

        let mut f = form();
        f.meals_per_day = "5".into();
        assert!(matches!(
            f.coerce(),
            Err(PlannerError::InvalidField { field: "mealsPerDay", .. })
        ));

        let mut f = form();
        f.age = "abc".into();
        assert!(matches!(f.coerce(), Err(PlannerError::InvalidField { field: "age", .. })));

        let mut f = form();
        f.age = "1e20".into();
        assert!(matches!(f.coerce(), Err(PlannerError::InvalidField { field: "age", .. })));
    }

    #[test]
    fn test_form_from_profile_coerces_back() {
        let p = UserProfile::new("Ravi")
            .with_body(41, Sex::Other, 181.5, 92.25)
            .with_goal(Goal::Endurance)
            .with_diet(DietType::Keto, MealsPerDay::Three);
        assert_eq!(ProfileForm::from(&p).coerce().unwrap(), p);
    }

    #[test]
    fn test_strict_parse_and_display() {
        for d in DietType::ALL {
            assert_eq!(d.to_string().parse::<DietType>().unwrap(), d);
        }
        assert!("very".parse::<ActivityLevel>().is_ok());
        assert!("extreme".parse::<ActivityLevel>().is_err());
        assert_eq!("muscle_gain".parse::<Goal>().unwrap(), Goal::MuscleGain);
    }

    #[test]
    fn test_profile_serde_uses_form_field_names() {
        let json = serde_json::to_value(UserProfile::default()).unwrap();
        assert_eq!(json["heightCm"], 175.0);
        assert_eq!(json["dietType"], "indian_vegetarian");
        assert_eq!(json["mealsPerDay"], 4);
        assert_eq!(json["activity"], "moderate");
        assert_eq!(json["goal"], "muscle_gain");

        let bad = r#"{"name":"","age":30,"sex":"male","heightCm":175,"weightKg":75,
            "activity":"moderate","goal":"maintenance","dietType":"vegan","mealsPerDay":5}"#;
        assert!(serde_json::from_str::<UserProfile>(bad).is_err());
    }

    #[test]
    fn test_partial_profile_fills_defaults() {
        let p: UserProfile = serde_json::from_str(r#"{"name":"Ravi","dietType":"vegan"}"#).unwrap();
        assert_eq!(p.name, "Ravi");
        assert_eq!(p.diet_type, DietType::Vegan);
        assert_eq!(p.age, 30);
        assert_eq!(p.meals_per_day, MealsPerDay::Four);
    }
}
