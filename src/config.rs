// Site configuration
// Defaults mirror the live site; each value can be overridden through TRAILTRUST_* variables

use crate::catalog::FEATURED_TREKS;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const BOOKING_DELAY_ENV: &str = "TRAILTRUST_BOOKING_DELAY_MS";
pub const CONTACT_DELAY_ENV: &str = "TRAILTRUST_CONTACT_DELAY_MS";
pub const FEATURED_TREKS_ENV: &str = "TRAILTRUST_FEATURED_TREKS";

// How long the simulated backend takes to "deliver" each kind of inquiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionConfig {
    pub booking_delay_ms: u64,
    pub contact_delay_ms: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            booking_delay_ms: 2000,
            contact_delay_ms: 1500,
        }
    }
}

impl SubmissionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            booking_delay_ms: env_or(BOOKING_DELAY_ENV, defaults.booking_delay_ms),
            contact_delay_ms: env_or(CONTACT_DELAY_ENV, defaults.contact_delay_ms),
        }
    }

    pub fn booking_delay(&self) -> Duration {
        Duration::from_millis(self.booking_delay_ms)
    }

    pub fn contact_delay(&self) -> Duration {
        Duration::from_millis(self.contact_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub submission: SubmissionConfig,
    pub featured_treks: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            submission: SubmissionConfig::default(),
            featured_treks: FEATURED_TREKS,
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self {
            submission: SubmissionConfig::from_env(),
            featured_treks: env_or(FEATURED_TREKS_ENV, FEATURED_TREKS),
        }
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(key, value = raw, default = %default, "ignoring invalid config value");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.featured_treks, 3);
        assert_eq!(config.submission.booking_delay(), Duration::from_millis(2000));
        assert_eq!(config.submission.contact_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_parse_or_falls_back_on_garbage() {
        assert_eq!(parse_or("K", " 250 ", 2000u64), 250);
        assert_eq!(parse_or("K", "fast", 2000u64), 2000);
        assert_eq!(parse_or("K", "-1", 3usize), 3);
    }

    #[test]
    fn test_from_env_overrides() {
        // Only this test touches these variables
        std::env::set_var(BOOKING_DELAY_ENV, "10");
        std::env::set_var(CONTACT_DELAY_ENV, "not-a-number");
        std::env::set_var(FEATURED_TREKS_ENV, "5");

        let config = SiteConfig::from_env();
        assert_eq!(config.submission.booking_delay_ms, 10);
        assert_eq!(config.submission.contact_delay_ms, 1500);
        assert_eq!(config.featured_treks, 5);

        std::env::remove_var(BOOKING_DELAY_ENV);
        std::env::remove_var(CONTACT_DELAY_ENV);
        std::env::remove_var(FEATURED_TREKS_ENV);
    }
}
