//! Type and keyword rules, and the TOML rules file.
//!
//! ```toml
//! [types]
//! Inspection = 2.0
//! "Site visit" = 4.5
//!
//! [[keywords]]
//! keyword = "urgent"
//! hours = 8.0
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{HoursError, Result};

/// Hours for every row whose type equals `type_value` exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRule {
    pub type_value: String,
    pub hours: f64,
}

impl TypeRule {
    pub fn new(type_value: impl Into<String>, hours: f64) -> Self {
        Self {
            type_value: type_value.into(),
            hours,
        }
    }
}

/// Hours for every row whose name contains `keyword`, ignoring case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    pub hours: f64,
}

impl KeywordRule {
    pub fn new(keyword: impl Into<String>, hours: f64) -> Self {
        Self {
            keyword: keyword.into(),
            hours,
        }
    }

    /// A rule only takes part in a run with a keyword and positive hours.
    pub fn is_active(&self) -> bool {
        !self.keyword.is_empty() && self.hours > 0.0
    }
}

pub(crate) fn check_hours(rule: impl FnOnce() -> String, hours: f64) -> Result<()> {
    if hours.is_finite() && hours >= 0.0 {
        Ok(())
    } else {
        Err(HoursError::InvalidHours {
            rule: rule(),
            hours,
        })
    }
}

/// Configured rules, as read from a rules file or the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoursRules {
    /// Hours per type value. Types not listed default to 0.
    #[serde(default)]
    pub types: BTreeMap<String, f64>,
    /// Keyword rules, applied in order.
    #[serde(default)]
    pub keywords: Vec<KeywordRule>,
}

impl HoursRules {
    #[must_use]
    pub fn with_type(mut self, type_value: impl Into<String>, hours: f64) -> Self {
        self.types.insert(type_value.into(), hours);
        self
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>, hours: f64) -> Self {
        self.keywords.push(KeywordRule::new(keyword, hours));
        self
    }

    /// Adds `other`'s rules after this set's; `other` wins on type conflicts.
    pub fn extend(&mut self, other: HoursRules) {
        self.types.extend(other.types);
        self.keywords.extend(other.keywords);
    }

    pub fn validate(&self) -> Result<()> {
        for (type_value, hours) in &self.types {
            check_hours(|| format!("type '{type_value}'"), *hours)?;
        }
        for rule in &self.keywords {
            check_hours(|| format!("keyword '{}'", rule.keyword), rule.hours)?;
        }
        Ok(())
    }

    /// One type rule per observed type, in observed order.
    ///
    /// Observed types without a configured value get 0 hours; configured
    /// types that were not observed are dropped.
    pub fn type_rules(&self, observed: &[String]) -> Vec<TypeRule> {
        for type_value in self.types.keys() {
            if !observed.contains(type_value) {
                warn!(type_value = %type_value, "configured type not present in input");
            }
        }
        observed
            .iter()
            .map(|type_value| {
                let hours = self.types.get(type_value).copied().unwrap_or(0.0);
                TypeRule::new(type_value.as_str(), hours)
            })
            .collect()
    }

    /// Active keyword rules in configured order.
    pub fn keyword_rules(&self) -> Vec<KeywordRule> {
        self.keywords
            .iter()
            .filter(|rule| {
                let active = rule.is_active();
                if !active {
                    debug!(keyword = %rule.keyword, hours = rule.hours, "skipping inactive keyword rule");
                }
                active
            })
            .cloned()
            .collect()
    }
}

/// Parses a rules document.
pub fn parse_rules(contents: &str, path: &Path) -> Result<HoursRules> {
    let rules: HoursRules = toml::from_str(contents).map_err(|e| HoursError::Toml {
        path: path.to_path_buf(),
        source: e,
    })?;
    rules.validate()?;
    Ok(rules)
}

/// Loads and validates a TOML rules file.
pub fn load_rules(path: &Path) -> Result<HoursRules> {
    let contents = std::fs::read_to_string(path).map_err(|e| HoursError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_rules(&contents, path)
}
