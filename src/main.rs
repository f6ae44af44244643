use anyhow::{Context, Result};
use calorie_tracker::classifier::ClassifierProvider;
use calorie_tracker::cli::parse_args;
use calorie_tracker::config::TrackerConfig;
use calorie_tracker::food_matcher::FoodIndex;
use calorie_tracker::intake::{log_image, log_phrase};
use calorie_tracker::intake_aggregator::{summarize, FoodLog};
use calorie_tracker::report::{PhraseReport, SessionReport};

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "calorie_tracker=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    if json_logs {
        builder.with_target(false).json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = parse_args();
    let mut config = TrackerConfig::from_env().context("Invalid configuration in environment")?;
    cli.apply_to(&mut config);
    config.validate()?;

    let index = FoodIndex::from_csv(&config.table_path, config.resolver)?;
    let profile = cli.profile();
    let mut log = FoodLog::new();

    let phrases: Vec<PhraseReport> = cli
        .texts
        .iter()
        .map(|text| PhraseReport {
            text: text.clone(),
            items: log_phrase(&index, text, &mut log),
        })
        .collect();

    let provider = match &cli.predictions {
        Some(path) => ClassifierProvider::precomputed(path),
        None => ClassifierProvider::hugging_face(&config.classifier.model, &config.classifier.api_key_env_var),
    };

    let mut images = Vec::with_capacity(cli.images.len());
    for image in &cli.images {
        images.push(log_image(&index, &provider, image, &config.classifier.policy, &mut log).await);
    }

    let report = SessionReport {
        profile,
        bmi: profile.bmi(),
        phrases,
        images,
        summary: summarize(&log, profile.daily_target()),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    Ok(())
}
