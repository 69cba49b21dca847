use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;

pub const DEFAULT_URL: &str = "http://tis.zsr.sk/elis/pohybvlaku?jazyk_stranky=sk";
const DEFAULT_TIMEOUT_SECS: i64 = 30;
const DEFAULT_USER_AGENT: &str = concat!("zsr_delays/", env!("CARGO_PKG_VERSION"));

const CONFIG_FILE: &str = "zsr_delays";
const ENV_PREFIX: &str = "ZSR";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Settings {
    /// Defaults, then `zsr_delays.toml` (if present), then `ZSR_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(
            File::with_name(CONFIG_FILE).required(false),
            Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        )
    }

    fn from_sources<F>(file: F, env: Environment) -> Result<Self, ConfigError>
    where
        F: Source + Send + Sync + 'static,
    {
        Config::builder()
            .set_default("url", DEFAULT_URL)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}
