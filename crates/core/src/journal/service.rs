//! Journal period closing rules.
//!
//! Closing a (journal, period) pair is only allowed once the posted
//! entries in that pair balance. The store layer computes the posted
//! totals; this service applies the rules and produces the updated
//! closure record.

use balafon_shared::types::{round_fcfa, UserId};
use chrono::Utc;
use rust_decimal::Decimal;

use crate::journal::error::JournalError;
use crate::journal::types::{JournalPeriod, JournalPeriodState};

/// Stateless service applying journal period closing rules.
pub struct JournalCloseService;

impl JournalCloseService {
    /// Close a journal period.
    ///
    /// # Arguments
    /// * `period` - The open closure record
    /// * `debit_total` - Sum of posted debit lines in the pair
    /// * `credit_total` - Sum of posted credit lines in the pair
    /// * `tolerance` - Maximum tolerated debit/credit difference
    /// * `closed_by` - The user closing the pair
    ///
    /// # Returns
    /// * `Ok(JournalPeriod)` with the closed record
    /// * `Err(JournalError::PeriodAlreadyClosed)` if already closed
    /// * `Err(JournalError::UnbalancedClose)` if totals differ beyond tolerance
    pub fn close(
        period: &JournalPeriod,
        debit_total: Decimal,
        credit_total: Decimal,
        tolerance: Decimal,
        closed_by: UserId,
    ) -> Result<JournalPeriod, JournalError> {
        if !period.is_open() {
            return Err(JournalError::PeriodAlreadyClosed);
        }

        let difference = (debit_total - credit_total).abs();
        if difference > tolerance {
            return Err(JournalError::UnbalancedClose {
                debit_total,
                credit_total,
                difference: round_fcfa(difference),
            });
        }

        let mut closed = period.clone();
        closed.state = JournalPeriodState::Closed;
        closed.closed_by = Some(closed_by);
        closed.closed_at = Some(Utc::now());
        Ok(closed)
    }

    /// Reopen a closed journal period.
    ///
    /// # Returns
    /// * `Ok(JournalPeriod)` with a fresh open record
    /// * `Err(JournalError::PeriodNotClosed)` if the pair is not closed
    pub fn reopen(period: &JournalPeriod) -> Result<JournalPeriod, JournalError> {
        if period.is_open() {
            return Err(JournalError::PeriodNotClosed);
        }

        let mut reopened = period.clone();
        reopened.state = JournalPeriodState::Open;
        reopened.closed_by = None;
        reopened.closed_at = None;
        Ok(reopened)
    }

    /// Build the next entry reference for a journal, e.g. `VTE-2026-0042`.
    ///
    /// The sequence is zero-padded to four digits; wider sequences
    /// print in full.
    #[must_use]
    pub fn next_reference(journal_code: &str, year: i32, sequence: u32) -> String {
        format!("{journal_code}-{year}-{sequence:04}")
    }
}
