//! Tier classification.

use rust_decimal::Decimal;

use crate::config::TierThresholds;
use crate::models::ScoreTier;

/// Maps a score onto its colour tier.
///
/// Each threshold is inclusive: a score equal to the green threshold is
/// green.
///
/// # Examples
///
/// ```
/// use csr_engine::calculation::classify_tier;
/// use csr_engine::config::ScoringConfig;
/// use csr_engine::models::ScoreTier;
/// use rust_decimal::Decimal;
///
/// let tiers = ScoringConfig::default().tiers().clone();
/// assert_eq!(classify_tier(Decimal::new(90, 0), &tiers), ScoreTier::Green);
/// assert_eq!(classify_tier(Decimal::new(89, 0), &tiers), ScoreTier::Yellow);
/// ```
pub fn classify_tier(score: Decimal, thresholds: &TierThresholds) -> ScoreTier {
    if score >= thresholds.green {
        ScoreTier::Green
    } else if score >= thresholds.yellow {
        ScoreTier::Yellow
    } else if score >= thresholds.orange {
        ScoreTier::Orange
    } else {
        ScoreTier::Red
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tier(score: &str) -> ScoreTier {
        classify_tier(dec(score), ScoringConfig::default().tiers())
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(tier("100"), ScoreTier::Green);
        assert_eq!(tier("90"), ScoreTier::Green);
        assert_eq!(tier("89"), ScoreTier::Yellow);
        assert_eq!(tier("70"), ScoreTier::Yellow);
        assert_eq!(tier("69"), ScoreTier::Orange);
        assert_eq!(tier("50"), ScoreTier::Orange);
        assert_eq!(tier("49"), ScoreTier::Red);
        assert_eq!(tier("0"), ScoreTier::Red);
    }

    #[test]
    fn test_fractional_scores_below_threshold() {
        assert_eq!(tier("89.99"), ScoreTier::Yellow);
        assert_eq!(tier("69.99"), ScoreTier::Orange);
        assert_eq!(tier("49.99"), ScoreTier::Red);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = TierThresholds {
            green: dec("95"),
            yellow: dec("80"),
            orange: dec("60"),
        };
        assert_eq!(classify_tier(dec("90"), &thresholds), ScoreTier::Yellow);
        assert_eq!(classify_tier(dec("59"), &thresholds), ScoreTier::Red);
    }
}
