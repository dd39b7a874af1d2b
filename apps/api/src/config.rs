use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Grid size used when a preview request omits `rows` / `cols`.
    pub default_rows: usize,
    pub default_cols: usize,
    /// Wall-clock budget for one layout search, in seconds.
    pub time_budget_secs: f64,
    /// Longest-first cap on words considered per puzzle.
    pub max_words: usize,
    /// Fixed RNG seed for reproducible layouts (tests, demos).
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            default_rows: 15,
            default_cols: 15,
            time_budget_secs: 1.0,
            max_words: 30,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_or("PORT", env("PORT"), defaults.port)?,
            rust_log: env("RUST_LOG").unwrap_or(defaults.rust_log),
            default_rows: parse_or(
                "CROSSWORD_DEFAULT_ROWS",
                env("CROSSWORD_DEFAULT_ROWS"),
                defaults.default_rows,
            )?,
            default_cols: parse_or(
                "CROSSWORD_DEFAULT_COLS",
                env("CROSSWORD_DEFAULT_COLS"),
                defaults.default_cols,
            )?,
            time_budget_secs: parse_or(
                "CROSSWORD_TIME_BUDGET_SECS",
                env("CROSSWORD_TIME_BUDGET_SECS"),
                defaults.time_budget_secs,
            )?,
            max_words: parse_or(
                "CROSSWORD_MAX_WORDS",
                env("CROSSWORD_MAX_WORDS"),
                defaults.max_words,
            )?,
            seed: env("CROSSWORD_SEED")
                .map(|raw| parse_or("CROSSWORD_SEED", Some(raw), 0))
                .transpose()?,
        })
    }
}

fn env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parses `raw` when present, otherwise returns `default`.
fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| {
                format!("Environment variable '{key}' has an invalid value '{value}'")
            }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_default_when_missing() {
        assert_eq!(parse_or::<u16>("PORT", None, 8080).unwrap(), 8080);
    }

    #[test]
    fn test_parse_or_parses_value() {
        assert_eq!(parse_or::<usize>("ROWS", Some(" 21 ".to_string()), 15).unwrap(), 21);
        let budget = parse_or::<f64>("BUDGET", Some("2.5".to_string()), 1.0).unwrap();
        assert!((budget - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_or_names_bad_variable() {
        let err = parse_or::<u16>("PORT", Some("http".to_string()), 8080).unwrap_err();
        assert!(err.to_string().contains("PORT"), "error was: {err}");
    }
}
