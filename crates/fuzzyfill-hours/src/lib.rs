//! Hours assignment for tabular work lists.
//!
//! Rows get hours from their `Type` first; keyword rules matched against
//! `Name` then override, the last matching keyword rule winning.

#![deny(unsafe_code)]

pub mod engine;
pub mod error;
pub mod rules;

pub use engine::{
    HoursColumns, HoursReport, HoursSummary, apply_rules, assign, assign_configured,
    observed_types, prepare, type_counts,
};
pub use error::{HoursError, Result};
pub use rules::{HoursRules, KeywordRule, TypeRule, load_rules, parse_rules};
