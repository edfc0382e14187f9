//! Runtime configuration.
//!
//! Read from `BLOCKFALL_*` environment variables; anything unset keeps its default.

use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context};

use blockfall_types::{Timings, DEFAULT_QUEUE_LEN, MAX_QUEUE_LEN};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Piece sequence seed; None derives one from the clock
    pub seed: Option<u32>,
    pub timings: Timings,
    pub queue_len: usize,
    /// Lifecycle logging on stderr
    pub log: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            timings: Timings::default(),
            queue_len: DEFAULT_QUEUE_LEN,
            log: false,
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load and validate configuration from any variable source
    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Timings::default();
        let timings = Timings {
            normal_ms: parse_var(&get, "BLOCKFALL_NORMAL_MS")?.unwrap_or(defaults.normal_ms),
            sliding_ms: parse_var(&get, "BLOCKFALL_SLIDING_MS")?.unwrap_or(defaults.sliding_ms),
            fast_ms: parse_var(&get, "BLOCKFALL_FAST_MS")?.unwrap_or(defaults.fast_ms),
            repeat_ms: parse_var(&get, "BLOCKFALL_REPEAT_MS")?.unwrap_or(defaults.repeat_ms),
        };

        let config = Self {
            seed: parse_var(&get, "BLOCKFALL_SEED")?,
            timings,
            queue_len: parse_var(&get, "BLOCKFALL_QUEUE_LEN")?.unwrap_or(DEFAULT_QUEUE_LEN),
            log: get("BLOCKFALL_LOG").map(|v| is_truthy(&v)).unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject timings that break `Fast < Sliding < Normal` and out-of-range queue lengths
    pub fn validate(&self) -> anyhow::Result<()> {
        let t = &self.timings;
        if t.fast_ms == 0 {
            bail!("BLOCKFALL_FAST_MS must be greater than 0");
        }
        if t.repeat_ms == 0 {
            bail!("BLOCKFALL_REPEAT_MS must be greater than 0");
        }
        if t.fast_ms >= t.sliding_ms {
            bail!(
                "BLOCKFALL_FAST_MS ({}) must be less than BLOCKFALL_SLIDING_MS ({})",
                t.fast_ms,
                t.sliding_ms
            );
        }
        if t.sliding_ms >= t.normal_ms {
            bail!(
                "BLOCKFALL_SLIDING_MS ({}) must be less than BLOCKFALL_NORMAL_MS ({})",
                t.sliding_ms,
                t.normal_ms
            );
        }
        debug_assert!(t.is_ordered());

        if !(1..=MAX_QUEUE_LEN).contains(&self.queue_len) {
            bail!(
                "BLOCKFALL_QUEUE_LEN must be between 1 and {}, got {}",
                MAX_QUEUE_LEN,
                self.queue_len
            );
        }
        Ok(())
    }

    /// Configured seed, or one derived from the system clock
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

fn parse_var<F, T>(get: &F, name: &str) -> anyhow::Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(raw) = get(name) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .with_context(|| format!("invalid {}={:?}", name, raw))
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = EngineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.timings.normal_ms, 500);
        assert_eq!(config.queue_len, 3);
        assert!(!config.log);
    }

    #[test]
    fn test_overrides() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("BLOCKFALL_SEED", "42"),
            ("BLOCKFALL_NORMAL_MS", "800"),
            ("BLOCKFALL_SLIDING_MS", "200"),
            ("BLOCKFALL_FAST_MS", "40"),
            ("BLOCKFALL_REPEAT_MS", "60"),
            ("BLOCKFALL_QUEUE_LEN", "5"),
            ("BLOCKFALL_LOG", "yes"),
        ]))
        .unwrap();

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.resolved_seed(), 42);
        assert_eq!(
            config.timings,
            Timings {
                normal_ms: 800,
                sliding_ms: 200,
                fast_ms: 40,
                repeat_ms: 60,
            }
        );
        assert_eq!(config.queue_len, 5);
        assert!(config.log);
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = EngineConfig::from_lookup(lookup(&[("BLOCKFALL_SEED", "  ")])).unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_unparsable_value_names_variable() {
        let err = EngineConfig::from_lookup(lookup(&[("BLOCKFALL_FAST_MS", "fast")])).unwrap_err();
        assert!(err.to_string().contains("BLOCKFALL_FAST_MS"));
    }

    #[test]
    fn test_unordered_timings_rejected() {
        let err = EngineConfig::from_lookup(lookup(&[("BLOCKFALL_SLIDING_MS", "700")])).unwrap_err();
        assert!(err.to_string().contains("BLOCKFALL_SLIDING_MS"));

        let err = EngineConfig::from_lookup(lookup(&[("BLOCKFALL_FAST_MS", "100")])).unwrap_err();
        assert!(err.to_string().contains("BLOCKFALL_FAST_MS"));

        let err = EngineConfig::from_lookup(lookup(&[("BLOCKFALL_REPEAT_MS", "0")])).unwrap_err();
        assert!(err.to_string().contains("BLOCKFALL_REPEAT_MS"));
    }

    #[test]
    fn test_queue_len_bounds() {
        assert!(EngineConfig::from_lookup(lookup(&[("BLOCKFALL_QUEUE_LEN", "0")])).is_err());
        assert!(EngineConfig::from_lookup(lookup(&[("BLOCKFALL_QUEUE_LEN", "8")])).is_err());
        assert!(EngineConfig::from_lookup(lookup(&[("BLOCKFALL_QUEUE_LEN", "1")])).is_ok());
    }

    #[test]
    fn test_truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy("TRUE"));
        assert!(is_truthy(" on "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }
}
