//! FCFA amount helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal` in CFA francs (FCFA).

use rust_decimal::Decimal;

/// Rounds an amount to the two decimal places used for FCFA reporting.
#[must_use]
pub fn round_fcfa(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}

/// Formats an amount for display, e.g. `1000.00 FCFA`.
#[must_use]
pub fn format_fcfa(amount: Decimal) -> String {
    format!("{:.2} FCFA", round_fcfa(amount))
}
