use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Prefix for environment overrides, e.g. `ROSTER__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "ROSTER";
const ENV_SEPARATOR: &str = "__";
pub const DEFAULT_FILE: &str = "server";

#[roster_derive::roster_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads configuration from an optional file overlaid with environment variables.
///
/// 1. **File**: `path` (default `server`) in any format the `config` crate understands
///    (`server.toml`, `server.json`, ...). A missing file is not an error.
/// 2. **Environment**: variables prefixed with `ROSTER__`, nested with `__`
///    (`ROSTER__STORAGE__DATA_DIR` maps to `storage.data_dir`).
///
/// Sections absent from both layers keep the defaults of `T`.
///
/// # Errors
/// Fails when the file exists but cannot be parsed, or when the merged values do not
/// match the shape of `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = path.map_or_else(|| PathBuf::from(DEFAULT_FILE), |p| p.as_ref().to_path_buf());
    layered(&file, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR).try_parsing(true)
}

fn layered<T>(file: &Path, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    Config::builder()
        .add_source(File::from(file).required(false))
        .add_source(env)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
