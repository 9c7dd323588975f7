//! Hierarchical drill-down comparison of the legacy and current ledgers

use bigdecimal::BigDecimal;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use tracing::Instrument;
use uuid::Uuid;

use crate::coding::transcoder;
use crate::reconciliation::{DualNatureUnifier, ReconciliationConfig};
use crate::traits::*;
use crate::types::*;

type WalkFuture<'a> =
    Pin<Box<dyn Future<Output = ReconciliationResult<ReconciliationOutcome>> + Send + 'a>>;

/// Walks the chart of accounts level by level and reports what the target is missing
///
/// Branches whose balance and turnover already agree are never expanded. At the
/// leaf level missing accounts are listed and every account's transactions are
/// compared by id.
pub struct ReconciliationEngine<S, T, U = DualNatureUnifier>
where
    S: SourceAccountRepository,
    T: TargetAccountRepository,
    U: AccountUnifier,
{
    source: S,
    target: T,
    unifier: U,
    config: ReconciliationConfig,
}

impl<S, T> ReconciliationEngine<S, T>
where
    S: SourceAccountRepository,
    T: TargetAccountRepository,
{
    /// Create an engine with the default unifier and configuration
    pub fn new(source: S, target: T) -> Self {
        Self {
            source,
            target,
            unifier: DualNatureUnifier,
            config: ReconciliationConfig::default(),
        }
    }
}

impl<S, T, U> ReconciliationEngine<S, T, U>
where
    S: SourceAccountRepository,
    T: TargetAccountRepository,
    U: AccountUnifier,
{
    /// Create an engine with a custom unifier and configuration
    pub fn with_config(
        source: S,
        target: T,
        unifier: U,
        config: ReconciliationConfig,
    ) -> ReconciliationResult<Self> {
        config.validate()?;
        Ok(Self {
            source,
            target,
            unifier,
            config,
        })
    }

    /// Configuration the engine walks with
    pub fn config(&self) -> &ReconciliationConfig {
        &self.config
    }

    /// Reconcile the whole chart of accounts
    pub async fn run(&self) -> ReconciliationResult<ReconciliationOutcome> {
        self.execute(None, 0).await
    }

    /// Reconcile the subtree under `parent_key`, starting at `level`
    ///
    /// A repository failure anywhere in the subtree aborts the whole call; no
    /// partial outcome is returned.
    pub async fn execute(
        &self,
        parent_key: Option<&str>,
        level: usize,
    ) -> ReconciliationResult<ReconciliationOutcome> {
        self.walk(parent_key.map(str::to_string), level).await
    }

    fn walk(&self, parent_key: Option<String>, level: usize) -> WalkFuture<'_> {
        let span = tracing::debug_span!(
            "reconcile_level",
            depth = level,
            parent_key = parent_key.as_deref().unwrap_or("")
        );

        Box::pin(
            async move {
                let mut outcome = ReconciliationOutcome::new();
                if level >= self.config.max_levels {
                    return Ok(outcome);
                }

                let filter = self.config.filters[level].with_parent(parent_key.as_deref());
                let source_aggregates = self
                    .source
                    .get_account_aggregates(&filter)
                    .await
                    .inspect_err(|e| {
                        tracing::warn!(error = %e, "source aggregate fetch failed")
                    })?;
                let target_raw = self
                    .target
                    .get_account_aggregates(&filter)
                    .await
                    .inspect_err(|e| {
                        tracing::warn!(error = %e, "target aggregate fetch failed")
                    })?;

                let dual_keys: Vec<String> = source_aggregates
                    .iter()
                    .filter(|a| a.is_dual_nature_source())
                    .map(|a| a.group_key.clone())
                    .collect();

                let mut unified: HashMap<String, AccountAggregate> = HashMap::new();
                for aggregate in self
                    .unifier
                    .unify(&dual_keys, target_raw.into_values().collect())
                {
                    unified
                        .entry(aggregate.group_key.clone())
                        .or_insert(aggregate);
                }

                tracing::debug!(
                    source = source_aggregates.len(),
                    target = unified.len(),
                    dual = dual_keys.len(),
                    "fetched level aggregates"
                );

                if level == self.config.leaf_level() {
                    for aggregate in &source_aggregates {
                        if !unified.contains_key(&aggregate.group_key) {
                            record_missing_account(aggregate, &mut outcome);
                        }
                        self.compare_transactions(&aggregate.group_key, &mut outcome)
                            .await?;
                    }
                    return Ok(outcome);
                }

                for aggregate in source_aggregates {
                    if unified
                        .get(&aggregate.group_key)
                        .is_some_and(|current| aggregate.matches(current))
                    {
                        tracing::debug!(group_key = %aggregate.group_key, "branch reconciled");
                        continue;
                    }

                    let nested = self.walk(Some(aggregate.group_key), level + 1).await?;
                    outcome.merge(nested);
                }

                Ok(outcome)
            }
            .instrument(span),
        )
    }

    async fn compare_transactions(
        &self,
        group_key: &str,
        outcome: &mut ReconciliationOutcome,
    ) -> ReconciliationResult<()> {
        let source_txns = self.source.get_transactions(group_key).await?;
        let target_txns = self.target.get_transactions(group_key).await?;

        let existing: HashSet<Uuid> = target_txns.iter().map(|t| t.transaction_id).collect();
        for txn in source_txns {
            if !existing.contains(&txn.transaction_id) {
                tracing::debug!(
                    group_key,
                    transaction_id = %txn.transaction_id,
                    "transaction missing from target"
                );
                outcome.missing_transaction_infos.push(txn);
            }
        }

        Ok(())
    }
}

fn record_missing_account(aggregate: &AccountAggregate, outcome: &mut ReconciliationOutcome) {
    let key = &aggregate.group_key;
    if transcoder::is_dual_nature(key) {
        tracing::info!(group_key = %key, "dual-nature account missing from target");
        outcome.missing_account_infos.push(AccountDetail {
            full_code: transcoder::to_debit_code(key),
            is_dual_nature: true,
            normal_balance: BalanceNature::Debit,
            balance: BigDecimal::from(0),
        });
        outcome.missing_account_infos.push(AccountDetail {
            full_code: transcoder::to_credit_code(key),
            is_dual_nature: true,
            normal_balance: BalanceNature::Credit,
            balance: BigDecimal::from(0),
        });
    } else {
        tracing::info!(group_key = %key, "account missing from target");
        let normal_balance = if aggregate.balance <= BigDecimal::from(0) {
            BalanceNature::Debit
        } else {
            BalanceNature::Credit
        };
        outcome.missing_account_infos.push(AccountDetail {
            full_code: transcoder::to_debit_code(key),
            is_dual_nature: false,
            normal_balance,
            balance: aggregate.balance.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(key: &str, balance: i64) -> AccountAggregate {
        AccountAggregate::new(key, BigDecimal::from(balance), BigDecimal::from(0), 0)
    }

    #[test]
    fn test_dual_nature_account_yields_two_details() {
        let mut outcome = ReconciliationOutcome::new();
        record_missing_account(&aggregate("CCCCDDDDEE", 200), &mut outcome);

        let codes: Vec<_> = outcome
            .missing_account_infos
            .iter()
            .map(|d| (d.full_code.as_str(), d.normal_balance, d.is_dual_nature))
            .collect();
        assert_eq!(
            codes,
            vec![
                ("CCCCDCCCCD", BalanceNature::Debit, true),
                ("DDDEEDDDEE", BalanceNature::Credit, true),
            ]
        );
    }

    #[test]
    fn test_single_nature_nature_follows_balance_sign() {
        let mut outcome = ReconciliationOutcome::new();
        record_missing_account(&aggregate("1234512345", 10), &mut outcome);
        record_missing_account(&aggregate("1234512345", 0), &mut outcome);
        record_missing_account(&aggregate("1234512345", -3), &mut outcome);

        let natures: Vec<_> = outcome
            .missing_account_infos
            .iter()
            .map(|d| d.normal_balance)
            .collect();
        assert_eq!(
            natures,
            vec![
                BalanceNature::Credit,
                BalanceNature::Debit,
                BalanceNature::Debit
            ]
        );
        assert!(outcome
            .missing_account_infos
            .iter()
            .all(|d| d.full_code == "1234512345" && !d.is_dual_nature));
        assert_eq!(outcome.missing_account_infos[0].balance, BigDecimal::from(10));
    }
}
