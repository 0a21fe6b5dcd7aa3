//! Shared penalty arithmetic.
//!
//! Every category scales its deficiency ratio into its capped penalty pool
//! the same way; this module holds that rule and the result type each
//! category calculation returns.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{AuditStep, CategoryBreakdown, ComplianceCategory, RemediationHint};

/// Number of decimal places penalties and scores are reported with.
pub const SCORE_DECIMAL_PLACES: u32 = 2;

/// The outcome of scoring one compliance category.
#[derive(Debug, Clone)]
pub struct CategoryResult {
    /// How the category contributed to the score.
    pub breakdown: CategoryBreakdown,
    /// Actions that would recover points in this category.
    pub remediation: Vec<RemediationHint>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Rounds a point value to the reported precision, midpoints away from zero.
///
/// # Examples
///
/// ```
/// use csr_engine::calculation::round_points;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_points(Decimal::from_str("8.335").unwrap()), Decimal::from_str("8.34").unwrap());
/// ```
pub fn round_points(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(SCORE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Scales `ratio` (0..=1) into a penalty pool of size `cap`.
///
/// The result is rounded to the reported precision and never exceeds `cap`.
pub fn scaled_penalty(cap: Decimal, ratio: Decimal) -> Decimal {
    let ratio = ratio.clamp(Decimal::ZERO, Decimal::ONE);
    round_points(cap * ratio).min(cap)
}

/// Scales `deficient / total` into a penalty pool of size `cap`.
///
/// Returns zero when `total` is zero: with nothing measured there is
/// nothing to penalize. The multiplication happens before the division so
/// that a fully deficient category yields exactly `cap`.
///
/// # Examples
///
/// ```
/// use csr_engine::calculation::proportional_penalty;
/// use rust_decimal::Decimal;
///
/// let cap = Decimal::new(25, 0);
/// assert_eq!(proportional_penalty(cap, 3, 3), cap);
/// assert_eq!(proportional_penalty(cap, 1, 2), Decimal::new(1250, 2));
/// assert_eq!(proportional_penalty(cap, 0, 0), Decimal::ZERO);
/// ```
pub fn proportional_penalty(cap: Decimal, deficient: u32, total: u32) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    let deficient = deficient.min(total);
    round_points(cap * Decimal::from(deficient) / Decimal::from(total)).min(cap)
}

/// Builds the breakdown for a category from its cap and penalty.
pub fn breakdown(
    category: ComplianceCategory,
    cap: Decimal,
    penalty: Decimal,
    deficient: u32,
    total: u32,
) -> CategoryBreakdown {
    CategoryBreakdown {
        category,
        cap,
        penalty,
        earned: cap - penalty,
        deficient,
        total,
    }
}
