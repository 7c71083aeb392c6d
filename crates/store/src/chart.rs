//! Chart of accounts application service.

use std::sync::Arc;

use balafon_core::chart::{
    AccountClass, AccountReport, AccountRuleViolation, AccountType, AccountValidator, ChartAccount,
    ChartReport, ChartStructureValidator, ComplianceReport, ComplianceScorer,
};
use balafon_shared::types::{AccountId, PageRequest, PageResponse, UserId};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StoreError;
use crate::repository::{AccountRepository, EntryRepository};

/// Input for creating or replacing a chart account.
///
/// The account class is derived from the first digit of the code, and
/// the level from the parent chain, so neither is part of the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInput {
    /// Account code (2 to 6 digits).
    pub code: String,
    /// Account type.
    pub account_type: AccountType,
    /// Account name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Parent account, when this is a sub-account.
    pub parent_id: Option<AccountId>,
    /// Whether this is an auxiliary (per-counterparty) account.
    pub is_auxiliary: bool,
    /// Whether this account is subject to external reconciliation.
    pub is_reconcilable: bool,
}

/// Service for managing the chart of accounts.
///
/// Every mutation runs the SYSCOHADA account rules before touching the
/// store, so the chart never holds an account with a hard violation.
pub struct ChartService<A: AccountRepository, E: EntryRepository> {
    accounts: Arc<A>,
    entries: Arc<E>,
}

impl<A: AccountRepository, E: EntryRepository> ChartService<A, E> {
    /// Create a new chart service.
    #[must_use]
    pub fn new(accounts: Arc<A>, entries: Arc<E>) -> Self {
        Self { accounts, entries }
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The code is malformed or breaks any SYSCOHADA rule
    /// - The parent account does not exist
    /// - The code is already taken
    pub async fn create_account(
        &self,
        input: AccountInput,
        created_by: UserId,
    ) -> Result<ChartAccount, StoreError> {
        let Some(class) = AccountClass::from_code(&input.code) else {
            return Err(StoreError::AccountInvalid {
                violations: vec![AccountRuleViolation::MalformedCode { code: input.code }],
            });
        };
        let level = self.resolve_level(input.parent_id).await?;

        let account = ChartAccount {
            id: AccountId::new(),
            code: input.code,
            class,
            account_type: input.account_type,
            name: input.name,
            description: input.description,
            parent_id: input.parent_id,
            level,
            is_auxiliary: input.is_auxiliary,
            is_reconcilable: input.is_reconcilable,
            is_active: true,
        };

        let report = AccountValidator::validate(&account);
        if !report.is_valid {
            return Err(StoreError::AccountInvalid {
                violations: report.errors,
            });
        }

        let created = self.accounts.insert(account).await?;
        info!(
            code = %created.code,
            name = %created.name,
            created_by = %created_by,
            "Account created"
        );
        Ok(created)
    }

    /// Replace an existing account's attributes.
    ///
    /// The account keeps its identity and active flag; class and level
    /// are re-derived from the new code and parent.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - The new attributes break any SYSCOHADA rule
    /// - The new code is taken by another account
    pub async fn update_account(
        &self,
        id: AccountId,
        input: AccountInput,
        updated_by: UserId,
    ) -> Result<ChartAccount, StoreError> {
        let existing = self
            .accounts
            .fetch(id)
            .await?
            .ok_or(StoreError::AccountNotFound(id))?;

        let Some(class) = AccountClass::from_code(&input.code) else {
            return Err(StoreError::AccountInvalid {
                violations: vec![AccountRuleViolation::MalformedCode { code: input.code }],
            });
        };
        let level = self.resolve_level(input.parent_id).await?;

        let account = ChartAccount {
            id: existing.id,
            code: input.code,
            class,
            account_type: input.account_type,
            name: input.name,
            description: input.description,
            parent_id: input.parent_id,
            level,
            is_auxiliary: input.is_auxiliary,
            is_reconcilable: input.is_reconcilable,
            is_active: existing.is_active,
        };

        let report = AccountValidator::validate(&account);
        if !report.is_valid {
            return Err(StoreError::AccountInvalid {
                violations: report.errors,
            });
        }

        let updated = self.accounts.update(account).await?;
        info!(
            code = %updated.code,
            updated_by = %updated_by,
            "Account updated"
        );
        Ok(updated)
    }

    /// Deactivate an account (soft delete).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account does not exist
    /// - The account is referenced by journal entries
    /// - The account has active children
    pub async fn deactivate_account(
        &self,
        id: AccountId,
        deactivated_by: UserId,
    ) -> Result<ChartAccount, StoreError> {
        let mut account = self
            .accounts
            .fetch(id)
            .await?
            .ok_or(StoreError::AccountNotFound(id))?;

        let entry_count = self.entries.count_by_account(id).await?;
        if entry_count > 0 {
            return Err(StoreError::CannotDeactivateWithEntries(entry_count));
        }

        let child_count = self
            .accounts
            .list()
            .await?
            .iter()
            .filter(|a| a.parent_id == Some(id) && a.is_active)
            .count();
        if child_count > 0 {
            return Err(StoreError::CannotDeactivateWithChildren(child_count));
        }

        account.is_active = false;
        let updated = self.accounts.update(account).await?;
        info!(
            code = %updated.code,
            deactivated_by = %deactivated_by,
            "Account deactivated"
        );
        Ok(updated)
    }

    /// Fetch one account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist.
    pub async fn get_account(&self, id: AccountId) -> Result<ChartAccount, StoreError> {
        self.accounts
            .fetch(id)
            .await?
            .ok_or(StoreError::AccountNotFound(id))
    }

    /// List accounts ordered by code, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn list_accounts(
        &self,
        page: &PageRequest,
    ) -> Result<PageResponse<ChartAccount>, StoreError> {
        let accounts = self.accounts.list().await?;
        Ok(paginate(accounts, page))
    }

    /// Search accounts by code prefix or name substring.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn search_accounts(
        &self,
        query: &str,
        page: &PageRequest,
    ) -> Result<PageResponse<ChartAccount>, StoreError> {
        let matches = self.accounts.search(query).await?;
        Ok(paginate(matches, page))
    }

    /// Suggest the next free child code under a parent account.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent does not exist, is already at
    /// maximum depth, or has no free child code left.
    pub async fn suggest_child_code(&self, parent_id: AccountId) -> Result<String, StoreError> {
        let parent = self
            .accounts
            .fetch(parent_id)
            .await?
            .ok_or(StoreError::ParentNotFound(parent_id))?;
        let accounts = self.accounts.list().await?;
        let codes: Vec<&str> = accounts.iter().map(|a| a.code.as_str()).collect();
        Ok(ChartStructureValidator::generate_child_code(
            &parent.code,
            &codes,
        )?)
    }

    /// Run the single-account rules against a stored account.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist.
    pub async fn validate_account(&self, id: AccountId) -> Result<AccountReport, StoreError> {
        let account = self
            .accounts
            .fetch(id)
            .await?
            .ok_or(StoreError::AccountNotFound(id))?;
        Ok(AccountValidator::validate(&account))
    }

    /// Validate the whole chart structure.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn validate_chart(&self) -> Result<ChartReport, StoreError> {
        let accounts = self.accounts.list().await?;
        Ok(ChartStructureValidator::validate(&accounts))
    }

    /// Score the chart's SYSCOHADA compliance.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub async fn check_compliance(&self) -> Result<ComplianceReport, StoreError> {
        let accounts = self.accounts.list().await?;
        Ok(ComplianceScorer::check_compliance(&accounts))
    }

    async fn resolve_level(&self, parent_id: Option<AccountId>) -> Result<u8, StoreError> {
        match parent_id {
            Some(parent_id) => {
                let parent = self
                    .accounts
                    .fetch(parent_id)
                    .await?
                    .ok_or(StoreError::ParentNotFound(parent_id))?;
                Ok(parent.level.saturating_add(1))
            }
            None => Ok(1),
        }
    }
}

fn paginate(accounts: Vec<ChartAccount>, page: &PageRequest) -> PageResponse<ChartAccount> {
    let total = u64::try_from(accounts.len()).unwrap_or(u64::MAX);
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);
    let data = accounts.into_iter().skip(offset).take(limit).collect();
    PageResponse::new(data, page.page, page.per_page, total)
}
