use crate::config::Config;
use crate::crossword::SearchSettings;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Search settings for one request; a request seed wins over the configured one.
    pub fn search_settings(&self, seed: Option<u64>) -> SearchSettings {
        SearchSettings {
            max_words: self.config.max_words,
            seed: seed.or(self.config.seed),
            ..SearchSettings::default()
        }
    }
}
