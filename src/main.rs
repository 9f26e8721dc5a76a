use std::process::ExitCode;

use folio::PageConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wgpu=warn,naga=warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => match PageConfig::load(&path) {
            Ok(config) => {
                tracing::info!(path = %path.to_string_lossy(), "loaded config");
                config
            }
            Err(e) => {
                tracing::error!(path = %path.to_string_lossy(), error = %e, "could not load config");
                return ExitCode::FAILURE;
            }
        },
        None => PageConfig::default(),
    };

    match folio::app::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "folio exited with an error");
            ExitCode::FAILURE
        }
    }
}
