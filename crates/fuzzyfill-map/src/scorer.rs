//! Named similarity scorers.
//!
//! The set of scorers is closed: a run selects one [`Scorer`] up front and
//! every comparison in that run goes through [`Scorer::score`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::fuzz;

/// A string similarity strategy producing integer scores in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Scorer {
    /// Plain edit-distance ratio.
    #[serde(rename = "Ratio")]
    Ratio,
    /// Best ratio of the shorter string against substrings of the longer.
    #[serde(rename = "Partial Ratio")]
    PartialRatio,
    /// Ratio after sorting tokens.
    #[serde(rename = "Token Sort")]
    TokenSort,
    /// Ratio over token intersection and differences.
    #[serde(rename = "Token Set")]
    TokenSet,
    /// Blend of the above weighted by relative length.
    #[default]
    #[serde(rename = "Weighted Ratio")]
    WeightedRatio,
}

impl Scorer {
    pub const ALL: [Scorer; 5] = [
        Scorer::Ratio,
        Scorer::PartialRatio,
        Scorer::TokenSort,
        Scorer::TokenSet,
        Scorer::WeightedRatio,
    ];

    /// Display name, as accepted by [`Scorer::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Ratio => "Ratio",
            Self::PartialRatio => "Partial Ratio",
            Self::TokenSort => "Token Sort",
            Self::TokenSet => "Token Set",
            Self::WeightedRatio => "Weighted Ratio",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Ratio => "edit-distance similarity of the whole strings",
            Self::PartialRatio => "best match of the shorter string inside the longer",
            Self::TokenSort => "word order ignored",
            Self::TokenSet => "word order and repeated or extra words ignored",
            Self::WeightedRatio => "blend of the other scorers weighted by length",
        }
    }

    /// Scores two already-normalized strings.
    pub fn score(self, a: &str, b: &str) -> u8 {
        let raw = match self {
            Self::Ratio => fuzz::ratio(a, b),
            Self::PartialRatio => fuzz::partial_ratio(a, b),
            Self::TokenSort => fuzz::token_sort_ratio(a, b),
            Self::TokenSet => fuzz::token_set_ratio(a, b),
            Self::WeightedRatio => fuzz::weighted_ratio(a, b),
        };
        raw.round().clamp(0.0, 100.0) as u8
    }

    fn expected_names() -> String {
        Self::ALL
            .into_iter()
            .map(Scorer::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scorer {
    type Err = MatchError;

    /// Accepts display names case-insensitively, plus kebab/snake aliases
    /// such as `token-set` or `partial_ratio`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw
            .trim()
            .to_lowercase()
            .replace(['-', '_'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let scorer = match normalized.as_str() {
            "ratio" | "simple ratio" => Self::Ratio,
            "partial ratio" | "partial" => Self::PartialRatio,
            "token sort" | "token sort ratio" => Self::TokenSort,
            "token set" | "token set ratio" => Self::TokenSet,
            "weighted ratio" | "wratio" | "weighted" => Self::WeightedRatio,
            _ => {
                return Err(MatchError::UnknownScorer {
                    name: raw.to_string(),
                    expected: Self::expected_names(),
                });
            }
        };
        Ok(scorer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_names() {
        for scorer in Scorer::ALL {
            assert_eq!(scorer.name().parse::<Scorer>().unwrap(), scorer);
        }
    }

    #[test]
    fn parses_aliases() {
        assert_eq!("token-set".parse::<Scorer>().unwrap(), Scorer::TokenSet);
        assert_eq!("PARTIAL_RATIO".parse::<Scorer>().unwrap(), Scorer::PartialRatio);
        assert_eq!("WRatio".parse::<Scorer>().unwrap(), Scorer::WeightedRatio);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "levenshtein".parse::<Scorer>().unwrap_err();
        assert!(matches!(err, MatchError::UnknownScorer { ref name, .. } if name == "levenshtein"));
        assert!(err.to_string().contains("Weighted Ratio"));
    }

    #[test]
    fn scores_are_rounded() {
        // 100 * 8 / 13 = 61.54
        assert_eq!(Scorer::Ratio.score("kitten", "sitting"), 62);
        assert_eq!(Scorer::TokenSort.score("smith john", "john smith"), 100);
    }

    #[test]
    fn serializes_with_display_name() {
        let json = serde_json::to_string(&Scorer::TokenSet).unwrap();
        assert_eq!(json, "\"Token Set\"");
    }
}
