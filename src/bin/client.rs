use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use clap::Parser;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use finance_tracker::{ApiClient, run_tui};

/// A terminal client for the finance tracker API.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The base URL of the API service.
    #[arg(long, default_value = "http://localhost:5000")]
    api_url: String,

    /// Where to write the HTML statistics report.
    #[arg(long, default_value = "statistics.html")]
    report_path: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    setup_logging();

    let api = ApiClient::new(&args.api_url);
    tracing::info!("Using transactions API at {}", api.transactions_url());

    match run_tui(api, args.report_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("Terminal interface failed: {error}");
            eprintln!("Terminal interface failed: {error}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to a file only, anything written to stdout would corrupt the
/// terminal interface.
fn setup_logging() {
    let Some(log_file) = open_log_file(Path::new("client.log")) else {
        return;
    };

    let file_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(file_log)
        .init();
}

/// Open `path` for appending, warning on stderr if that fails. The warning is
/// printed before the terminal interface takes over the screen.
fn open_log_file(path: &Path) -> Option<File> {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(log_file) => Some(log_file),
        Err(error) => {
            eprintln!(
                "Could not create {}, running without logs: {error}",
                path.display()
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::open_log_file;

    #[test]
    fn log_file_is_created() {
        let path = std::env::temp_dir().join(format!(
            "finance-tracker-client-{}.log",
            std::process::id()
        ));

        let log_file = open_log_file(&path);

        assert!(log_file.is_some());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unopenable_log_file_is_reported_not_fatal() {
        let path = std::env::temp_dir()
            .join("finance-tracker-missing-directory")
            .join("nested")
            .join("client.log");

        assert!(open_log_file(&path).is_none());
    }
}
