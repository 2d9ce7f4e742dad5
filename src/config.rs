use std::env;
use std::sync::OnceLock;

static CONFIG: OnceLock<Config> = OnceLock::new();

// --- CONFIG AGGREGATOR ---

#[derive(Debug, Clone)]
pub struct Config {
    pub demo: DemoConfig,
}

impl Config {
    pub fn global() -> &'static Config {
        CONFIG.get_or_init(Self::load)
    }

    fn load() -> Self {
        dotenv::dotenv().ok();
        Self {
            demo: DemoConfig::load(),
        }
    }
}

// --- MODULES ---

// DEMO WORKLOAD
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub race_threads: usize,
    pub writer_threads: usize,
    pub increments_per_writer: u64,
    pub reader_threads: usize,
    pub log_level: String,
}

impl DemoConfig {
    fn load() -> Self {
        Self {
            race_threads:          get_env("UNICO_RACE_THREADS", "100"),
            writer_threads:        get_env("UNICO_WRITER_THREADS", "8"),
            increments_per_writer: get_env("UNICO_INCREMENTS_PER_WRITER", "10000"),
            reader_threads:        get_env("UNICO_READER_THREADS", "4"),
            log_level:             get_env("UNICO_LOG", "info"),
        }
    }
}

// --- PRIVATE HELPER ---

fn get_env<T: std::str::FromStr>(key: &str, default: &str) -> T {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| format!("Config error: {} must be valid", key))
        .unwrap()
}
