//! Mech Lab - Development Tools

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use mech_core::catalog::ComponentCategory;
use mech_core::validation::{ValidationCategory, ValidationOptions};
use mech_tools::commands::{self, OutputFormat, Report};
use mech_tools::load::{self, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mech-tools")]
#[command(about = "Construction and validation tools for BattleMech designs")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// RON list of equipment records
    #[arg(long, global = true)]
    equipment: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the construction pipeline
    Construct {
        /// Unit file (.json envelope or .ron snapshot)
        unit: PathBuf,
    },
    /// Validate a unit against every enabled rule
    Validate {
        /// Unit file (.json envelope or .ron snapshot)
        unit: PathBuf,
        /// RON validator configuration
        #[arg(long)]
        config: Option<PathBuf>,
        /// Only run rules in these categories
        #[arg(long, value_enum)]
        category: Vec<RuleCategory>,
        /// Skip a rule by id
        #[arg(long)]
        skip: Vec<String>,
        /// Evaluate rules in parallel
        #[arg(long)]
        parallel: bool,
        /// Apply automatic armor repairs before validating
        #[arg(long)]
        repair: bool,
    },
    /// Itemized C-bill cost
    Cost {
        /// Unit file (.json envelope or .ron snapshot)
        unit: PathBuf,
    },
    /// Battle value
    Bv {
        /// Unit file (.json envelope or .ron snapshot)
        unit: PathBuf,
    },
    /// List structural components
    Catalog {
        /// Only list this category
        #[arg(long, value_enum)]
        category: Option<Category>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RuleCategory {
    Construction,
    Weight,
    Armor,
    Slots,
    Equipment,
    TechBase,
    RulesLevel,
    Era,
    Movement,
    Heat,
}

impl From<RuleCategory> for ValidationCategory {
    fn from(value: RuleCategory) -> Self {
        match value {
            RuleCategory::Construction => Self::Construction,
            RuleCategory::Weight => Self::Weight,
            RuleCategory::Armor => Self::Armor,
            RuleCategory::Slots => Self::Slots,
            RuleCategory::Equipment => Self::Equipment,
            RuleCategory::TechBase => Self::TechBase,
            RuleCategory::RulesLevel => Self::RulesLevel,
            RuleCategory::Era => Self::Era,
            RuleCategory::Movement => Self::Movement,
            RuleCategory::Heat => Self::Heat,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Category {
    Engine,
    Gyro,
    Structure,
    Armor,
    Cockpit,
    HeatSink,
    Enhancement,
}

impl From<Category> for ComponentCategory {
    fn from(value: Category) -> Self {
        match value {
            Category::Engine => Self::Engine,
            Category::Gyro => Self::Gyro,
            Category::Structure => Self::Structure,
            Category::Armor => Self::Armor,
            Category::Cockpit => Self::Cockpit,
            Category::HeatSink => Self::HeatSink,
            Category::Enhancement => Self::MovementEnhancement,
        }
    }
}

fn run(cli: Cli) -> Result<Report> {
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let equipment = cli.equipment.as_deref();

    match cli.command {
        Commands::Construct { unit } => commands::construct_unit(&load::load_unit(&unit)?, format),
        Commands::Validate {
            unit,
            config,
            category,
            skip,
            parallel,
            repair,
        } => {
            let options = ValidationOptions {
                categories: (!category.is_empty())
                    .then(|| category.into_iter().map(ValidationCategory::from).collect()),
                skip,
                parallel: parallel.then_some(true),
            };
            commands::validate_unit(
                &load::load_unit(&unit)?,
                &load::load_equipment(equipment)?,
                load::load_config(config.as_deref())?,
                &options,
                repair,
                format,
            )
        }
        Commands::Cost { unit } => commands::cost_unit(
            &load::load_unit(&unit)?,
            &load::load_equipment(equipment)?,
            format,
        ),
        Commands::Bv { unit } => commands::battle_value_unit(
            &load::load_unit(&unit)?,
            &load::load_equipment(equipment)?,
            format,
        ),
        Commands::Catalog { category } => commands::list_catalog(category.map(Into::into), format),
    }
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = run(cli);
    if let Ok(report) = &result {
        println!("{}", report.body);
    }
    std::process::exit(commands::exit_code(&result));
}
