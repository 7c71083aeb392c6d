//! Approval threshold resolution for journal entries.
//!
//! This module determines which approval levels an entry must pass
//! before it can be approved, based on its total amount and the
//! configured per-level thresholds.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The amount ceiling attached to an approval level.
///
/// A level is required for an entry when the entry's total amount
/// strictly exceeds the level's threshold. An unbounded threshold
/// is never exceeded, so its level is never required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Threshold {
    /// Amounts up to and including this limit stay below the level.
    Limit(Decimal),
    /// No amount triggers this level.
    Unbounded,
}

impl Threshold {
    /// Returns true when the amount strictly exceeds this threshold.
    #[must_use]
    pub fn is_exceeded_by(&self, amount: Decimal) -> bool {
        match self {
            Self::Limit(limit) => amount > *limit,
            Self::Unbounded => false,
        }
    }
}

/// The approval levels an entry must pass, resolved from its amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalPlan {
    /// Required levels in ascending order. Empty when no approval is needed.
    pub required_levels: Vec<u8>,
    /// The amount the plan was resolved for.
    pub total_amount: Decimal,
    /// The highest required level, if any level is required.
    pub highest_level: Option<u8>,
}

impl ApprovalPlan {
    /// Returns true when no approval level is required.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.required_levels.is_empty()
    }
}

/// Stateless resolver mapping entry amounts to required approval levels.
pub struct ApprovalThresholdResolver;

impl ApprovalThresholdResolver {
    /// Resolve the approval levels required for an amount.
    ///
    /// Each level is evaluated independently: it is required exactly
    /// when the amount strictly exceeds its threshold. An amount at
    /// or below every threshold requires no approval at all.
    ///
    /// # Arguments
    /// * `thresholds` - The configured thresholds, keyed by level
    /// * `total_amount` - The entry total (larger of debit and credit sums)
    ///
    /// # Returns
    /// The resolved plan, with levels in ascending order.
    #[must_use]
    pub fn required_levels(
        thresholds: &BTreeMap<u8, Threshold>,
        total_amount: Decimal,
    ) -> ApprovalPlan {
        let required_levels: Vec<u8> = thresholds
            .iter()
            .filter(|(_, threshold)| threshold.is_exceeded_by(total_amount))
            .map(|(level, _)| *level)
            .collect();

        let highest_level = required_levels.last().copied();
        ApprovalPlan {
            required_levels,
            total_amount,
            highest_level,
        }
    }

    /// Returns the standard three-level threshold table.
    ///
    /// Level 1 covers amounts above 100 000 FCFA, level 2 amounts
    /// above 1 000 000 FCFA. Level 3 is unbounded and therefore
    /// never required.
    #[must_use]
    pub fn default_thresholds() -> BTreeMap<u8, Threshold> {
        let mut thresholds = BTreeMap::new();
        thresholds.insert(1, Threshold::Limit(Decimal::from(100_000_i64)));
        thresholds.insert(2, Threshold::Limit(Decimal::from(1_000_000_i64)));
        thresholds.insert(3, Threshold::Unbounded);
        thresholds
    }

    /// Build a threshold table from configured level limits.
    ///
    /// The top level is always unbounded so that no amount can
    /// exceed the table entirely.
    #[must_use]
    pub fn thresholds_from_limits(
        level_1_limit: Decimal,
        level_2_limit: Decimal,
    ) -> BTreeMap<u8, Threshold> {
        let mut thresholds = BTreeMap::new();
        thresholds.insert(1, Threshold::Limit(level_1_limit));
        thresholds.insert(2, Threshold::Limit(level_2_limit));
        thresholds.insert(3, Threshold::Unbounded);
        thresholds
    }
}
