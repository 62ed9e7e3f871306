//! PathoTracer CLI - Main Entry Point

mod report;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use pathotracer_core::constants::{self, APP_NAME, APP_VERSION, ENV_CONFIG, ENV_LOG_LEVEL};
use pathotracer_core::logic::config::{self, EngineConfig};
use pathotracer_core::logic::environment::RiskModel;
use pathotracer_core::logic::history::{DecisionRecord, HistoryWriter};
use pathotracer_core::logic::knowledgebase::{self, breeding_recommendations, Knowledgebase};
use pathotracer_core::logic::model::Pathogen;
use pathotracer_core::logic::sample::{EnvironmentalReadings, GrowthStage, SampleInput, Season};
use pathotracer_core::DiagnosisPipeline;

#[derive(Parser, Debug)]
#[command(name = "pathotracer", version)]
#[command(about = "Rice disease decision engine: pathogen, resistance and risk fused into one recommendation")]
struct Cli {
    /// JSON configuration merged over the built-in defaults
    #[arg(long, global = true, env = ENV_CONFIG, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Diagnose one field sample
    Diagnose(DiagnoseArgs),
    /// Score environmental conditions only
    Assess {
        #[command(flatten)]
        readings: ReadingArgs,
        #[arg(long)]
        json: bool,
    },
    /// Look up a variety's resistance to a pathogen
    Lookup {
        variety: String,
        /// blast, sheath_blight, bacterial_blight or a scientific name
        pathogen: String,
        #[arg(long)]
        json: bool,
    },
    /// List known varieties
    Varieties,
    /// Breeding priorities from the resistance data
    Breeding {
        #[arg(long)]
        json: bool,
    },
    /// Show recently recorded decisions
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Validate configuration and print its fingerprint
    CheckConfig,
}

#[derive(Args, Debug)]
struct DiagnoseArgs {
    /// Sample as JSON; flags below override its fields
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    #[arg(long)]
    variety: Option<String>,

    #[arg(long)]
    sample_id: Option<String>,

    #[command(flatten)]
    readings: ReadingArgs,

    #[arg(long, value_parser = parse_stage)]
    stage: Option<GrowthStage>,

    /// Free-text symptom description
    #[arg(long)]
    symptoms: Option<String>,

    #[arg(long)]
    location: Option<String>,

    /// Print the full outcome as JSON
    #[arg(long)]
    json: bool,

    /// Do not append the decision to the history
    #[arg(long)]
    no_record: bool,
}

#[derive(Args, Debug, Default)]
struct ReadingArgs {
    /// Air temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    temperature: Option<f32>,

    /// Relative humidity (%)
    #[arg(long)]
    humidity: Option<f32>,

    /// Rainfall (mm)
    #[arg(long)]
    rainfall: Option<f32>,

    /// wet or dry
    #[arg(long, value_parser = parse_season)]
    season: Option<Season>,
}

impl ReadingArgs {
    fn apply(&self, mut readings: EnvironmentalReadings) -> EnvironmentalReadings {
        if let Some(t) = self.temperature {
            readings = readings.with_temperature(t);
        }
        if let Some(h) = self.humidity {
            readings = readings.with_humidity(h);
        }
        if let Some(r) = self.rainfall {
            readings = readings.with_rainfall(r);
        }
        if let Some(s) = self.season {
            readings = readings.with_season(s);
        }
        readings
    }
}

fn parse_season(value: &str) -> Result<Season, String> {
    Season::parse(value).ok_or_else(|| format!("unknown season '{}' (expected wet or dry)", value))
}

fn parse_stage(value: &str) -> Result<GrowthStage, String> {
    GrowthStage::parse(value).ok_or_else(|| {
        let names: Vec<&str> = GrowthStage::ALL.iter().map(|s| s.as_str()).collect();
        format!("unknown growth stage '{}' (expected one of {})", value, names.join(", "))
    })
}

fn init_logging() {
    let filter = std::env::var(ENV_LOG_LEVEL)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::new().parse_filters(&filter).init();
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    log::debug!("Starting {} v{}", APP_NAME, APP_VERSION);

    let config = config::load(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Command::Diagnose(args) => diagnose(&config, args),
        Command::Assess { readings, json } => {
            let risk = RiskModel::new(config.risk.clone())?.assess(&readings.apply(EnvironmentalReadings::new()));
            if json {
                println!("{}", serde_json::to_string_pretty(&risk)?);
            } else {
                print!("{}", report::risk(&risk));
            }
            Ok(())
        }
        Command::Lookup { variety, pathogen, json } => {
            let Some(pathogen) = Pathogen::from_label(&pathogen) else {
                bail!("unknown pathogen '{}'", pathogen);
            };
            let kb = knowledgebase::load(config.knowledgebase_path.as_deref())?;
            let record = kb.lookup(&variety, pathogen);
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print!("{}", report::resistance(&record));
            }
            Ok(())
        }
        Command::Varieties => {
            let kb = knowledgebase::load(config.knowledgebase_path.as_deref())?;
            for name in kb.varieties() {
                println!("{}", name);
            }
            Ok(())
        }
        Command::Breeding { json } => {
            let kb = knowledgebase::load(config.knowledgebase_path.as_deref())?;
            let recs = breeding_recommendations(&kb);
            if json {
                println!("{}", serde_json::to_string_pretty(&recs)?);
            } else {
                print!("{}", report::breeding(&recs));
            }
            Ok(())
        }
        Command::History { limit, json } => {
            let writer = HistoryWriter::with_max_size(config.history.dir.clone(), config.history.max_file_bytes)
                .with_context(|| format!("opening history at {}", config.history.dir.display()))?;
            let records = writer.read_recent(limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print!("{}", report::history(&records));
            }
            Ok(())
        }
        Command::CheckConfig => check_config(&config),
    }
}

fn diagnose(config: &EngineConfig, args: DiagnoseArgs) -> Result<()> {
    let sample = build_sample(&args)?;
    let pipeline = DiagnosisPipeline::from_config(config)?;
    let outcome = pipeline.diagnose(&sample)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", report::outcome(&outcome));
    }

    if !args.no_record {
        record(config, DecisionRecord::new(outcome.sample, outcome.decision, &config.fingerprint()));
    }
    Ok(())
}

fn build_sample(args: &DiagnoseArgs) -> Result<SampleInput> {
    let mut sample = match &args.input {
        Some(path) => read_sample(path)?,
        None => SampleInput::default(),
    };

    if let Some(variety) = &args.variety {
        sample.variety = variety.clone();
    }
    if let Some(id) = &args.sample_id {
        sample.sample_id = Some(id.clone());
    }
    if let Some(stage) = args.stage {
        sample.growth_stage = Some(stage);
    }
    if let Some(symptoms) = &args.symptoms {
        sample.symptoms = Some(symptoms.clone());
    }
    if let Some(location) = &args.location {
        sample.location = Some(location.clone());
    }
    sample.readings = args.readings.apply(sample.readings);

    Ok(sample)
}

fn read_sample(path: &Path) -> Result<SampleInput> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing sample {}", path.display()))
}

/// History is a collaborator: failures are logged, never fatal
fn record(config: &EngineConfig, record: DecisionRecord) {
    let result = HistoryWriter::with_max_size(config.history.dir.clone(), config.history.max_file_bytes)
        .and_then(|writer| writer.append(&record));
    match result {
        Ok(()) => log::debug!("Decision {} recorded", record.id),
        Err(e) => log::warn!("Failed to record decision in {}: {}", config.history.dir.display(), e),
    }
}

/// Builds every component `diagnose` would
fn check_config(config: &EngineConfig) -> Result<()> {
    let pipeline = DiagnosisPipeline::from_config(config)?;

    println!("{} v{}", APP_NAME, APP_VERSION);
    println!("Config version : {}", config.version);
    println!("Fingerprint    : {}", config.fingerprint());
    println!(
        "Classifier     : {}{}",
        pipeline.classifier_name(),
        config
            .classifier
            .model_path
            .as_ref()
            .map(|p| format!(" ({})", p.display()))
            .unwrap_or_default()
    );
    println!(
        "Knowledgebase  : {}",
        config
            .knowledgebase_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    );
    println!("Varieties      : {}", pipeline.knowledgebase().varieties().len());
    println!("History        : {}", config.history.dir.display());
    println!("Data dir       : {}", constants::data_dir().display());
    println!();
    print!("{}", report::priority_table(pipeline.engine().matrix()));
    Ok(())
}
