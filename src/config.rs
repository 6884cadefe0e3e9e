use std::fs;
use std::ops::Range;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/chat.json";
pub const DEFAULT_STORAGE_PATH: &str = "data/chat.db";

const DEFAULT_CANDIDATES: [&str; 5] = ["Alice", "Bob", "Charlie", "Diana", "Eve"];

const DEFAULT_CANNED_MESSAGES: [&str; 8] = [
    "Hello everyone! 👋",
    "How's it going?",
    "Anyone working on anything interesting?",
    "Great to see everyone here!",
    "What do you think about this?",
    "I agree with that point",
    "That's a good idea!",
    "Thanks for sharing!",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage_path: String,
    pub simulation: SimulationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_path: DEFAULT_STORAGE_PATH.to_string(),
            simulation: SimulationConfig::default(),
        }
    }
}

/// Knobs of the simulated room. Defaults reproduce the browser demo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub presence_interval_secs: u64,
    pub reply_delay_min_secs: u64,
    pub reply_delay_max_secs: u64,
    pub min_others: usize,
    pub max_others: usize,
    pub candidate_pool: Vec<String>,
    pub canned_messages: Vec<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            presence_interval_secs: 30,
            reply_delay_min_secs: 15,
            reply_delay_max_secs: 45,
            min_others: 1,
            max_others: 3,
            candidate_pool: DEFAULT_CANDIDATES.iter().map(|s| s.to_string()).collect(),
            canned_messages: DEFAULT_CANNED_MESSAGES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SimulationConfig {
    pub fn presence_interval(&self) -> Duration {
        Duration::from_secs(self.presence_interval_secs.max(1))
    }

    /// Half-open delay window for simulated replies. An inverted or empty
    /// window collapses to one second starting at the minimum.
    pub fn reply_delay(&self) -> Range<Duration> {
        let min = Duration::from_secs(self.reply_delay_min_secs);
        let max = if self.reply_delay_max_secs > self.reply_delay_min_secs {
            Duration::from_secs(self.reply_delay_max_secs)
        } else {
            min + Duration::from_secs(1)
        };
        min..max
    }

    /// Inclusive bounds on how many simulated users join a recompute.
    pub fn others_range(&self) -> (usize, usize) {
        let min = self.min_others;
        (min, self.max_others.max(min))
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}
