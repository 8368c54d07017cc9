use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const CONFIG_ENV: &str = "BLACKJACK_CONFIG";
pub const SEED_ENV: &str = "BLACKJACK_SEED";
pub const HISTORY_ENV: &str = "BLACKJACK_HISTORY";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub history: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    #[default]
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub history: ValueSource,
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl ConfigResolved {
    /// Applies command-line flags on top of file and environment values.
    pub fn with_overrides(mut self, seed: Option<u64>, history: Option<PathBuf>) -> Self {
        if let Some(v) = seed {
            self.config.seed = Some(v);
            self.sources.seed = ValueSource::Cli;
        }
        if let Some(v) = history {
            self.config.history = Some(v);
            self.sources.history = ValueSource::Cli;
        }
        self
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

/// Resolves configuration from the process environment.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    resolve(|key| std::env::var(key).ok())
}

/// Resolves configuration with `lookup` standing in for the environment.
/// Later layers win: defaults, then the file named by `BLACKJACK_CONFIG`,
/// then `BLACKJACK_SEED` / `BLACKJACK_HISTORY`. Empty variables are ignored.
pub fn resolve<F>(lookup: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = var(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.history {
            cfg.history = Some(v);
            sources.history = ValueSource::File;
        }
    }

    if let Some(seed) = var(SEED_ENV) {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {}", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(path) = var(HISTORY_ENV) {
        cfg.history = Some(PathBuf::from(path));
        sources.history = ValueSource::Env;
    }

    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    history: Option<PathBuf>,
}

#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn config_file(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let r = resolve(lookup(&[])).unwrap();
        assert_eq!(r.config, Config::default());
        assert_eq!(r.sources.seed, ValueSource::Default);
        assert_eq!(r.sources.history, ValueSource::Default);
    }

    #[test]
    fn file_values_are_read() {
        let f = config_file("seed = 11\nhistory = \"rounds.jsonl\"\n");
        let path = f.path().to_string_lossy().to_string();
        let r = resolve(lookup(&[(CONFIG_ENV, &path)])).unwrap();
        assert_eq!(r.config.seed, Some(11));
        assert_eq!(r.config.history, Some(PathBuf::from("rounds.jsonl")));
        assert_eq!(r.sources.seed, ValueSource::File);
    }

    #[test]
    fn env_beats_file_and_cli_beats_env() {
        let f = config_file("seed = 11\n");
        let path = f.path().to_string_lossy().to_string();
        let r = resolve(lookup(&[(CONFIG_ENV, &path), (SEED_ENV, "22")])).unwrap();
        assert_eq!(r.config.seed, Some(22));
        assert_eq!(r.sources.seed, ValueSource::Env);

        let r = r.with_overrides(Some(33), None);
        assert_eq!(r.config.seed, Some(33));
        assert_eq!(r.sources.seed, ValueSource::Cli);
        assert_eq!(r.sources.history, ValueSource::Default);
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let r = resolve(lookup(&[(SEED_ENV, ""), (HISTORY_ENV, "")])).unwrap();
        assert_eq!(r.config, Config::default());
    }

    #[test]
    fn bad_seed_is_invalid() {
        let e = resolve(lookup(&[(SEED_ENV, "nope")])).unwrap_err();
        assert!(matches!(e, ConfigError::Invalid(_)));
        assert!(e.to_string().contains("nope"));
    }

    #[test]
    fn unknown_file_keys_are_rejected() {
        let f = config_file("starting_money = 500\n");
        let path = f.path().to_string_lossy().to_string();
        let e = resolve(lookup(&[(CONFIG_ENV, &path)])).unwrap_err();
        assert!(matches!(e, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let e = resolve(lookup(&[(CONFIG_ENV, "/definitely/not/here.toml")])).unwrap_err();
        assert!(matches!(e, ConfigError::Io(_)));
    }

    #[test]
    fn process_environment_is_consulted() {
        let _guard = env_lock();
        // SAFETY: env_lock serializes every test that touches the environment.
        unsafe {
            std::env::set_var(SEED_ENV, "4242");
        }
        let r = load_with_sources();
        unsafe {
            std::env::remove_var(SEED_ENV);
        }
        let r = r.unwrap();
        assert_eq!(r.config.seed, Some(4242));
        assert_eq!(r.sources.seed, ValueSource::Env);
    }
}
