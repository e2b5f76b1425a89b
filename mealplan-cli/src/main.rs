use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mealplan_core::{
    assemble_with_preference, write_json_export, ProfileForm, ProteinPreference, RecipeCatalog,
    UserProfile,
};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod report;
mod state;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MEALPLAN_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "mealplan",
    version,
    long_version = LONG_VERSION,
    about = "Nutrition targets and a deterministic weekly meal plan"
)]
struct Cli {
    #[command(flatten)]
    profile: ProfileArgs,

    /// JSON recipe catalog to use instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG wins when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Profile overrides; anything omitted comes from ~/.mealplan/config.toml.
///
/// Values go through the same coercion as form input: unknown activity and goal labels
/// fall back to moderate and maintenance, numbers are parsed leniently. Diet type and
/// meals per day must be valid.
#[derive(Args, Debug)]
struct ProfileArgs {
    #[arg(long, global = true)]
    name: Option<String>,
    #[arg(long, global = true)]
    age: Option<String>,
    /// male | other
    #[arg(long, global = true)]
    sex: Option<String>,
    #[arg(long, global = true)]
    height_cm: Option<String>,
    #[arg(long, global = true)]
    weight_kg: Option<String>,
    /// sedentary | light | moderate | active | very
    #[arg(long, global = true)]
    activity: Option<String>,
    /// fat_loss | muscle_gain | endurance | maintenance
    #[arg(long, global = true)]
    goal: Option<String>,
    /// balanced | high_protein | keto | vegetarian | vegan | indian_vegetarian
    #[arg(long, global = true)]
    diet: Option<String>,
    /// 3 or 4
    #[arg(long, global = true)]
    meals_per_day: Option<String>,
    /// plant | animal | mixed
    #[arg(long, global = true)]
    protein_pref: Option<ProteinPreference>,
}

impl ProfileArgs {
    fn apply(&self, base: &UserProfile) -> Result<UserProfile> {
        let mut form = ProfileForm::from(base);
        let overrides = [
            (&mut form.name, &self.name),
            (&mut form.age, &self.age),
            (&mut form.sex, &self.sex),
            (&mut form.height_cm, &self.height_cm),
            (&mut form.weight_kg, &self.weight_kg),
            (&mut form.activity, &self.activity),
            (&mut form.goal, &self.goal),
            (&mut form.diet_type, &self.diet),
            (&mut form.meals_per_day, &self.meals_per_day),
        ];
        for (field, value) in overrides {
            if let Some(v) = value {
                field.clone_from(v);
            }
        }
        form.coerce().context("invalid profile")
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print BMR, TDEE, calorie target and macro targets
    Targets,

    /// Print the 7-day meal plan
    Week,

    /// Print targets and the meal plan together
    Plan,

    /// Write plan_<name>.json
    Export {
        /// Output directory (default: config export_dir, else current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List diet/slot combinations the catalog cannot serve
    CatalogCheck,

    /// Write a default ~/.mealplan/config.toml
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = config::load_config()?;
    let profile = cli.profile.apply(&cfg.profile)?;
    let preference = cli.profile.protein_pref.unwrap_or(cfg.planner.protein_pref);
    let catalog = load_catalog(cli.catalog.or(cfg.planner.catalog.clone()))?;

    match cli.command {
        Command::Targets => {
            let plan = assemble_with_preference(&profile, &catalog, preference);
            print!("{}", report::render_targets(&plan.targets));
        }

        Command::Week => {
            let plan = assemble_with_preference(&profile, &catalog, preference);
            print!("{}", report::render_week(&plan.plan));
        }

        Command::Plan => {
            let plan = assemble_with_preference(&profile, &catalog, preference);
            print!("{}", report::render_plan(&plan));
        }

        Command::Export { out } => {
            let dir = out
                .or(cfg.planner.export_dir)
                .unwrap_or_else(|| PathBuf::from("."));
            let plan = assemble_with_preference(&profile, &catalog, preference);
            let path = write_json_export(&plan, &dir)
                .with_context(|| format!("exporting plan to {}", dir.display()))?;
            println!("Wrote {}", path.display());
        }

        Command::CatalogCheck => {
            print!("{}", report::render_coverage(&catalog));
        }

        Command::InitConfig => {
            config::init_config()?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(path: Option<PathBuf>) -> Result<RecipeCatalog> {
    match path {
        None => Ok(RecipeCatalog::builtin()),
        Some(p) => {
            let json = state::read_text(&p)?;
            let catalog = RecipeCatalog::from_json(&json)
                .with_context(|| format!("loading catalog {}", p.display()))?;
            debug!(path = %p.display(), recipes = catalog.len(), "loaded recipe catalog");
            Ok(catalog)
        }
    }
}
