//! Settings loading from a YAML file and the environment.
//!
//! Environment variables take precedence over the file, so a deployment can
//! keep a checked-in file and override single values per machine.

use std::path::Path;

use super::{ConfigError, Settings};

/// Settings file looked up in the working directory when none is given.
const DEFAULT_CONFIG_FILE: &str = "ceap-datasets.yaml";

/// Environment variables that map onto settings keys. Anything else in the
/// environment is ignored.
const ENV_KEYS: [&str; 5] = [
    "AMAZON_S3_REGION",
    "AMAZON_S3_BUCKET",
    "AMAZON_S3_DATASET_DATE",
    "ASSETS_ROOT",
    "BASE_DIR",
];

/// Keep only the variables named in `ENV_KEYS`.
fn settings_env(vars: impl IntoIterator<Item = (String, String)>) -> config::Map<String, String> {
    vars.into_iter()
        .filter(|(key, _)| ENV_KEYS.contains(&key.as_str()))
        .collect()
}

/// The settings variables of the process environment. Variables that are not
/// valid unicode are skipped.
fn process_env() -> config::Map<String, String> {
    settings_env(
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?))),
    )
}

impl Settings {
    /// Load settings from the command line argument, defaulting to
    /// `ceap-datasets.yaml`.
    ///
    /// The default file may be absent (everything can come from the
    /// environment); a file named explicitly must exist.
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let required = config_file.is_some();
        let config_file = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        Self::load_from_sources(&config_file, required, None)
    }

    /// Load settings from a file path layered under environment variables.
    ///
    /// `env` replaces the process environment when given. Either way only the
    /// settings variables are read from it.
    pub(crate) fn load_from_sources(
        path: &Path,
        required: bool,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let path_str = path
            .as_os_str()
            .to_str()
            .ok_or_else(|| ConfigError::EncodePath(path.to_path_buf()))?;

        let env = match env {
            Some(vars) => settings_env(vars),
            None => process_env(),
        };

        let settings = config::Config::builder()
            .add_source(config::File::new(path_str, config::FileFormat::Yaml).required(required))
            .add_source(config::Environment::default().source(Some(env)))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        tracing::debug!(config_file = %path.display(), "loaded settings");

        Ok(settings)
    }
}
