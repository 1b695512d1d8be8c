//! QuickCalc command runner
//!
//! Runs a single engine command and prints the result as JSON:
//!
//! ```text
//! quickcalc bmi 70 175
//! quickcalc convert "Kilometers to Miles" 10
//! quickcalc rules
//! ```
//!
//! Logs go to stderr so stdout stays machine-readable.

use anyhow::Result;
use quickcalc_app::{
    commands::{self, Command},
    config,
    session::Session,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting QuickCalc"
    );

    let mut session = Session::new(&config)?;

    let outcome = Command::parse(std::env::args().skip(1))
        .and_then(|command| commands::run(&command, &mut session));

    match outcome {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "Command failed");
            println!("{}", serde_json::to_string_pretty(&err.to_response())?);
            Err(err.into())
        }
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "quickcalc_app=info,quickcalc_engine=info".into()
        } else {
            "quickcalc_app=debug,quickcalc_engine=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
