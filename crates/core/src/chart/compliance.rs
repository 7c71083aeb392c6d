//! Compliance scoring for a chart of accounts.
//!
//! Five checks each weigh 20 points. A chart is compliant only at a
//! full score of 100.

use std::collections::HashMap;

use balafon_shared::types::AccountId;

use super::rules;
use super::types::{AccountClass, ChartAccount};

/// Outcome of each individual compliance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplianceChecks {
    /// Every account class is represented by at least one account.
    pub structure: bool,
    /// Every mandatory account is present and active.
    pub mandatory_accounts: bool,
    /// Every code is well formed and matches its declared class.
    pub numbering: bool,
    /// Every parent link resolves to a shorter-coded account.
    pub hierarchy: bool,
    /// Mandatory account names match the reference names.
    ///
    /// Mismatches are reported in the details but never fail the check.
    pub naming: bool,
}

/// Result of scoring a chart against the reference plan.
#[derive(Debug, Clone)]
pub struct ComplianceReport {
    /// Total score, a multiple of 20 between 0 and 100.
    pub score: u8,
    /// True only at a score of 100.
    pub is_compliant: bool,
    /// Individual check outcomes.
    pub checks: ComplianceChecks,
    /// Human-readable findings for failed or noisy checks.
    pub details: Vec<String>,
    /// Suggested remediations, one per failed check.
    pub recommendations: Vec<String>,
}

/// Stateless scorer that grades a chart of accounts.
pub struct ComplianceScorer;

impl ComplianceScorer {
    /// Scores the chart: five checks at 20 points each.
    #[must_use]
    pub fn check_compliance(accounts: &[ChartAccount]) -> ComplianceReport {
        let mut details = Vec::new();
        let mut recommendations = Vec::new();

        let structure = Self::check_structure(accounts, &mut details, &mut recommendations);
        let mandatory_accounts =
            Self::check_mandatory(accounts, &mut details, &mut recommendations);
        let numbering = Self::check_numbering(accounts, &mut details, &mut recommendations);
        let hierarchy = Self::check_hierarchy(accounts, &mut details, &mut recommendations);
        let naming = Self::check_naming(accounts, &mut details);

        let passed = u8::from(structure)
            + u8::from(mandatory_accounts)
            + u8::from(numbering)
            + u8::from(hierarchy)
            + u8::from(naming);
        let score = passed * 20;

        ComplianceReport {
            score,
            is_compliant: score == 100,
            checks: ComplianceChecks {
                structure,
                mandatory_accounts,
                numbering,
                hierarchy,
                naming,
            },
            details,
            recommendations,
        }
    }

    fn check_structure(
        accounts: &[ChartAccount],
        details: &mut Vec<String>,
        recommendations: &mut Vec<String>,
    ) -> bool {
        let missing: Vec<u8> = AccountClass::ALL
            .iter()
            .filter(|class| !accounts.iter().any(|a| a.class == **class))
            .map(|class| class.digit())
            .collect();
        if missing.is_empty() {
            return true;
        }
        for digit in &missing {
            details.push(format!("No account in class {digit}"));
        }
        recommendations.push("Create at least one account in every class 1 through 9".to_string());
        false
    }

    fn check_mandatory(
        accounts: &[ChartAccount],
        details: &mut Vec<String>,
        recommendations: &mut Vec<String>,
    ) -> bool {
        let missing: Vec<&str> = rules::MANDATORY_CODES
            .iter()
            .filter(|code| !accounts.iter().any(|a| a.code == **code && a.is_active))
            .copied()
            .collect();
        if missing.is_empty() {
            return true;
        }
        for code in &missing {
            details.push(format!("Mandatory account {code} is missing or inactive"));
        }
        recommendations.push(format!(
            "Add or reactivate the {} missing mandatory accounts",
            missing.len()
        ));
        false
    }

    fn check_numbering(
        accounts: &[ChartAccount],
        details: &mut Vec<String>,
        recommendations: &mut Vec<String>,
    ) -> bool {
        let mut ok = true;
        for account in accounts {
            if !rules::is_valid_code_format(&account.code) {
                details.push(format!("Account code {} is malformed", account.code));
                ok = false;
            } else if AccountClass::from_code(&account.code) != Some(account.class) {
                details.push(format!(
                    "Account {} is declared in class {} but its code says otherwise",
                    account.code,
                    account.class.digit()
                ));
                ok = false;
            }
        }
        if !ok {
            recommendations
                .push("Renumber accounts so each code starts with its class digit".to_string());
        }
        ok
    }

    fn check_hierarchy(
        accounts: &[ChartAccount],
        details: &mut Vec<String>,
        recommendations: &mut Vec<String>,
    ) -> bool {
        let by_id: HashMap<AccountId, &ChartAccount> =
            accounts.iter().map(|a| (a.id, a)).collect();
        let mut ok = true;
        for account in accounts {
            if let Some(parent_id) = account.parent_id {
                match by_id.get(&parent_id) {
                    None => {
                        details.push(format!(
                            "Account {} has an unresolved parent",
                            account.code
                        ));
                        ok = false;
                    }
                    Some(parent) if parent.code.len() >= account.code.len() => {
                        details.push(format!(
                            "Account {} has parent {} with a code that is not shorter",
                            account.code, parent.code
                        ));
                        ok = false;
                    }
                    Some(_) => {}
                }
            }
        }
        if !ok {
            recommendations
                .push("Fix parent links so every parent code is a shorter prefix".to_string());
        }
        ok
    }

    // Name mismatches are informational only; the check always passes.
    fn check_naming(accounts: &[ChartAccount], details: &mut Vec<String>) -> bool {
        for account in accounts {
            if let Some(reference) = rules::reference_name(&account.code) {
                let actual = account.name.trim().to_lowercase();
                if actual != reference.to_lowercase() {
                    details.push(format!(
                        "Account {} is named \"{}\" instead of \"{reference}\"",
                        account.code, account.name
                    ));
                }
            }
        }
        true
    }
}
