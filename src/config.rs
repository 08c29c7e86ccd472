// =====================================================================
// File: config.rs
// Author: Bob Jack
// Course: CSCE 5350: Fundamentals of Database Systems
// Final Project
// Date: Dec. 3, 2025
//
// Description:
//   Tuning knobs for the two indexes. Defaults match the reference
//   sizes (fanout 5, 4 slots per bucket); the binary can override them
//   from the environment:
//
//     TABLEINDEX_FANOUT     -> B+Tree fanout (>= 3)
//     TABLEINDEX_SLOTS      -> entries per hash bucket (>= 1)
//     TABLEINDEX_DIRECTORY  -> initial hash directory size (>= 1,
//                              rounded up to a power of two)
// =====================================================================
use crate::error::{IndexError, Result};
use crate::hash::DEFAULT_SLOTS;
use crate::index::{DEFAULT_FANOUT, MIN_FANOUT};

pub const FANOUT_VAR: &str = "TABLEINDEX_FANOUT";
pub const SLOTS_VAR: &str = "TABLEINDEX_SLOTS";
pub const DIRECTORY_VAR: &str = "TABLEINDEX_DIRECTORY";

/// Initial hash directory size when none is configured.
pub const DEFAULT_DIRECTORY: usize = 16;


/// Sizes used to build a [`Session`](crate::Session)'s indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    pub fanout: usize,
    pub slots: usize,
    pub initial_directory: usize,
}


impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            fanout: DEFAULT_FANOUT,
            slots: DEFAULT_SLOTS,
            initial_directory: DEFAULT_DIRECTORY,
        }
    }
}


impl IndexConfig {
    /// Defaults overridden by any `TABLEINDEX_*` variables that are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](IndexConfig::from_env) with a custom variable
    /// source.
    ///
    /// # Example
    /// ```
    /// use tableindex::IndexConfig;
    ///
    /// let config = IndexConfig::from_lookup(|name| match name {
    ///     "TABLEINDEX_FANOUT" => Some("8".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.fanout, 8);
    /// assert_eq!(config.slots, 4);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(FANOUT_VAR) {
            config.fanout = parse_var(FANOUT_VAR, &raw)?;
        }
        if let Some(raw) = lookup(SLOTS_VAR) {
            config.slots = parse_var(SLOTS_VAR, &raw)?;
        }
        if let Some(raw) = lookup(DIRECTORY_VAR) {
            config.initial_directory = parse_var(DIRECTORY_VAR, &raw)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Rejects sizes the indexes cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.fanout < MIN_FANOUT {
            return Err(IndexError::InvalidConfig(format!(
                "fanout must be at least {}, got {}",
                MIN_FANOUT, self.fanout
            )));
        }
        if self.slots == 0 {
            return Err(IndexError::InvalidConfig("slots must be at least 1".to_string()));
        }
        if self.initial_directory == 0 {
            return Err(IndexError::InvalidConfig(
                "initial directory must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}


fn parse_var(name: &str, raw: &str) -> Result<usize> {
    raw.trim()
        .parse()
        .map_err(|_| IndexError::InvalidConfig(format!("{} is not a number: '{}'", name, raw)))
}


#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = IndexConfig::default();
        assert_eq!(config.fanout, 5);
        assert_eq!(config.slots, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lookup_overrides_every_field() {
        let config = IndexConfig::from_lookup(lookup_from(&[
            ("TABLEINDEX_FANOUT", "7"),
            ("TABLEINDEX_SLOTS", " 2 "),
            ("TABLEINDEX_DIRECTORY", "10"),
        ]))
        .unwrap();
        assert_eq!(
            config,
            IndexConfig { fanout: 7, slots: 2, initial_directory: 10 }
        );
    }

    #[test]
    fn test_rejects_small_fanout() {
        let result = IndexConfig::from_lookup(lookup_from(&[("TABLEINDEX_FANOUT", "2")]));
        assert!(matches!(result, Err(IndexError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_slots_and_directory() {
        let slots = IndexConfig::from_lookup(lookup_from(&[("TABLEINDEX_SLOTS", "0")]));
        assert!(matches!(slots, Err(IndexError::InvalidConfig(_))));

        let dir = IndexConfig::from_lookup(lookup_from(&[("TABLEINDEX_DIRECTORY", "0")]));
        assert!(matches!(dir, Err(IndexError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_non_numeric() {
        let result = IndexConfig::from_lookup(lookup_from(&[("TABLEINDEX_SLOTS", "four")]));
        assert!(matches!(result, Err(IndexError::InvalidConfig(_))));
    }
}
