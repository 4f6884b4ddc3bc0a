//! Response rewriter CLI
//!
//! Reads a response JSON document from the path given as the first argument
//! (or stdin), runs the rewrite pipeline configured from the environment and
//! prints `{"response": ..., "report": ...}` to stdout. Logs go to stderr.

use response_rewriter::{Pipeline, Response, RewriteConfig};
use std::io::Read;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "response_rewriter=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = RewriteConfig::from_env()?;

    let mut response = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(path = %path, "Reading response");
            Response::from_path(&path)?
        }
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Response::from_json(&raw)?
        }
    };

    let pipeline = Pipeline::new(config);
    let report = pipeline.process(&mut response)?;
    tracing::info!(
        removed = report.triggers_removed,
        dates = report.dates_reformatted,
        "Response processed"
    );

    let output = serde_json::json!({
        "response": serde_json::to_value(&response)?,
        "report": serde_json::to_value(&report)?,
    });
    let rendered = if pipeline.config().pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}
