//! In-memory repository implementation for testing

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::reconciliation::AccountFilter;
use crate::traits::*;
use crate::types::*;

/// In-memory ledger serving both repository roles, for testing and development
///
/// Clones share the same data, so a test can keep a handle after moving one
/// into an engine.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountRepository {
    aggregates: Arc<RwLock<HashMap<AccountFilter, Vec<AccountAggregate>>>>,
    transactions: Arc<RwLock<HashMap<String, Vec<TransactionRecord>>>>,
    failing_filters: Arc<RwLock<HashSet<AccountFilter>>>,
    calls: Arc<AtomicUsize>,
}

impl MemoryAccountRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the aggregates a query with exactly `filter` returns
    pub fn insert_aggregates(
        &self,
        filter: AccountFilter,
        aggregates: Vec<AccountAggregate>,
    ) -> ReconciliationResult<()> {
        self.aggregates
            .write()
            .map_err(poisoned)?
            .insert(filter, aggregates);
        Ok(())
    }

    /// Store a transaction under its account code
    pub fn add_transaction(&self, transaction: TransactionRecord) -> ReconciliationResult<()> {
        self.transactions
            .write()
            .map_err(poisoned)?
            .entry(transaction.account_code.clone())
            .or_default()
            .push(transaction);
        Ok(())
    }

    /// Make aggregate queries with exactly `filter` fail
    pub fn fail_on(&self, filter: AccountFilter) -> ReconciliationResult<()> {
        self.failing_filters
            .write()
            .map_err(poisoned)?
            .insert(filter);
        Ok(())
    }

    /// Number of repository calls served so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> ReconciliationResult<()> {
        self.aggregates.write().map_err(poisoned)?.clear();
        self.transactions.write().map_err(poisoned)?.clear();
        self.failing_filters.write().map_err(poisoned)?.clear();
        self.calls.store(0, Ordering::SeqCst);
        Ok(())
    }

    fn aggregates_for(
        &self,
        filter: &AccountFilter,
    ) -> ReconciliationResult<Vec<AccountAggregate>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.failing_filters.read().map_err(poisoned)?.contains(filter) {
            return Err(ReconciliationError::Repository(format!(
                "aggregate query failed for parent {:?}",
                filter.parent_key
            )));
        }

        Ok(self
            .aggregates
            .read()
            .map_err(poisoned)?
            .get(filter)
            .cloned()
            .unwrap_or_default())
    }

    fn transactions_for(&self, group_key: &str) -> ReconciliationResult<Vec<TransactionRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .transactions
            .read()
            .map_err(poisoned)?
            .get(group_key)
            .cloned()
            .unwrap_or_default())
    }
}

fn poisoned<E>(_: E) -> ReconciliationError {
    ReconciliationError::Repository("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl SourceAccountRepository for MemoryAccountRepository {
    async fn get_account_aggregates(
        &self,
        filter: &AccountFilter,
    ) -> ReconciliationResult<Vec<AccountAggregate>> {
        self.aggregates_for(filter)
    }

    async fn get_transactions(
        &self,
        group_key: &str,
    ) -> ReconciliationResult<Vec<TransactionRecord>> {
        self.transactions_for(group_key)
    }
}

#[async_trait]
impl TargetAccountRepository for MemoryAccountRepository {
    async fn get_account_aggregates(
        &self,
        filter: &AccountFilter,
    ) -> ReconciliationResult<HashMap<String, AccountAggregate>> {
        Ok(self
            .aggregates_for(filter)?
            .into_iter()
            .map(|a| (a.group_key.clone(), a))
            .collect())
    }

    async fn get_transactions(
        &self,
        group_key: &str,
    ) -> ReconciliationResult<Vec<TransactionRecord>> {
        self.transactions_for(group_key)
    }
}
