//! Traits for repository abstraction and extensibility

use async_trait::async_trait;
use std::collections::HashMap;

use crate::reconciliation::AccountFilter;
use crate::types::*;

/// Read access to the legacy ledger being migrated from
///
/// Aggregates come back in the order the ledger reports them; the engine keeps
/// that order in its findings.
#[async_trait]
pub trait SourceAccountRepository: Send + Sync {
    /// Get the aggregates of one hierarchy slice
    async fn get_account_aggregates(
        &self,
        filter: &AccountFilter,
    ) -> ReconciliationResult<Vec<AccountAggregate>>;

    /// Get the transactions posted under a group key
    async fn get_transactions(&self, group_key: &str)
        -> ReconciliationResult<Vec<TransactionRecord>>;
}

/// Read access to the current ledger being migrated to
#[async_trait]
pub trait TargetAccountRepository: Send + Sync {
    /// Get the aggregates of one hierarchy slice, keyed by group key
    async fn get_account_aggregates(
        &self,
        filter: &AccountFilter,
    ) -> ReconciliationResult<HashMap<String, AccountAggregate>>;

    /// Get the transactions posted under a group key
    async fn get_transactions(&self, group_key: &str)
        -> ReconciliationResult<Vec<TransactionRecord>>;
}

/// Strategy for folding the target ledger's split accounts back into legacy keys
pub trait AccountUnifier: Send + Sync {
    /// Merge the debit and credit codes of every dual-nature key into one aggregate
    ///
    /// `dual_keys` are the legacy dual-nature codes seen in the source slice,
    /// `target_accounts` everything the target returned for the same slice.
    fn unify(
        &self,
        dual_keys: &[String],
        target_accounts: Vec<AccountAggregate>,
    ) -> Vec<AccountAggregate>;
}
