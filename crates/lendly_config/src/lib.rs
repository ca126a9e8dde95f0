use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
use tracing::debug;

pub mod models;

pub use models::*;

/// Prefix for environment overrides, e.g. `LENDLY__CALENDAR__TIME_ZONE`.
pub const ENV_PREFIX: &str = "LENDLY";

/// Loads the application configuration.
///
/// Sources, later ones winning:
/// 1. built-in defaults
/// 2. `<config dir>/default.{toml,json,yaml}`
/// 3. `<config dir>/<RUN_ENV>.{toml,json,yaml}`
/// 4. `LENDLY__*` environment variables
///
/// The config dir is `LENDLY_CONFIG_DIR` or `config` relative to the working directory.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir =
        PathBuf::from(env::var("LENDLY_CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);
    debug!(
        "Loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .set_default("calendar.time_zone", "UTC")?
        .set_default("calendar.week_starts_on", "Mon")?
        .set_default("logging.level", "info")?
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    builder.build()?.try_deserialize()
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file once per process and returns the path that was used.
///
/// `DOTENV_OVERRIDE` wins over a first command line argument starting with `.env`,
/// which wins over the default `.env`.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
