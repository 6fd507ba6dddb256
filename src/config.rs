use serde::Deserialize;
use tracing::level_filters::LevelFilter;

fn default_outcome_delay_ms() -> u32 {
    1_000
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableOptions {
    /// Fixed shuffle seed; entropy from the browser when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Pause before the winner is announced, letting the last cards render.
    #[serde(default = "default_outcome_delay_ms", alias = "outcomeDelayMs")]
    pub outcome_delay_ms: u32,
    /// Most verbose level written to the browser console (`off` to `trace`).
    #[serde(default = "default_log_level", alias = "logLevel")]
    pub log_level: String,
}

impl TableOptions {
    pub fn max_level(&self) -> Result<LevelFilter, String> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|err| format!("log_level `{}`: {err}", self.log_level))
    }
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            seed: None,
            outcome_delay_ms: default_outcome_delay_ms(),
            log_level: default_log_level(),
        }
    }
}
