use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod build;
mod commands;
mod config;

/// Download the updated version of the CEAP variables description table and
/// publish it as a styled HTML page
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Data directory of the datasets source (accepted for compatibility, unused)
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// The path to the settings file
    #[arg(short, long)]
    config_file: Option<PathBuf>,
}

/// Load `path` into the process environment. A missing file is not an error.
fn load_env_file(path: &Path) -> Result<(), dotenvy::Error> {
    match dotenvy::from_path(path) {
        Err(e) if e.not_found() => Ok(()),
        result => result,
    }
}

fn main() -> Result<(), anyhow::Error> {
    // Settings may come from a local .env file
    load_env_file(Path::new(".env"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    commands::publish::run(&args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();

        assert!(load_env_file(&dir.path().join(".env")).is_ok());
    }

    #[test]
    fn test_malformed_env_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "CEAP_BUCKET serenata-de-amor-data\n").unwrap();

        let err = load_env_file(&path).unwrap_err();
        assert!(!err.not_found());
    }
}
