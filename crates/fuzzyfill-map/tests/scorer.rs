//! Property tests for the scorer registry.

use fuzzyfill_map::Scorer;
use proptest::prelude::*;

proptest! {
    #[test]
    fn identical_strings_score_100(s in "[a-z]{1,12}( [a-z]{1,8}){0,3}") {
        for scorer in Scorer::ALL {
            prop_assert_eq!(scorer.score(&s, &s), 100, "{}", scorer);
        }
    }

    #[test]
    fn disjoint_alphabets_score_0(a in "[a-m]{1,10}", b in "[n-z]{1,10}") {
        for scorer in Scorer::ALL {
            prop_assert_eq!(scorer.score(&a, &b), 0, "{}", scorer);
        }
    }

    #[test]
    fn scores_are_symmetric(a in "[a-d ]{0,12}", b in "[a-d ]{0,12}") {
        for scorer in Scorer::ALL {
            prop_assert_eq!(scorer.score(&a, &b), scorer.score(&b, &a), "{}", scorer);
        }
    }

    #[test]
    fn scores_stay_in_range(a in "\\PC{0,16}", b in "\\PC{0,16}") {
        for scorer in Scorer::ALL {
            prop_assert!(scorer.score(&a, &b) <= 100);
        }
    }
}

#[test]
fn known_scores() {
    let cases = [
        (Scorer::Ratio, "acme corp", "acme corporation", 72),
        (Scorer::PartialRatio, "acme corp", "acme corporation", 100),
        (Scorer::TokenSort, "smith john", "john smith", 100),
        (Scorer::TokenSet, "jon smith", "john smith", 95),
        (Scorer::WeightedRatio, "acme corp", "acme corporation", 90),
        (Scorer::WeightedRatio, "acme", "globex", 30),
    ];
    for (scorer, a, b, expected) in cases {
        assert_eq!(scorer.score(a, b), expected, "{scorer}: '{a}' vs '{b}'");
    }
}
