//! Folding of split target accounts back into legacy dual-nature keys

use bigdecimal::BigDecimal;
use std::collections::HashMap;

use crate::coding::transcoder;
use crate::traits::AccountUnifier;
use crate::types::*;

/// Default unifier: sums the debit and credit codes of each dual-nature key
#[derive(Debug, Clone, Copy, Default)]
pub struct DualNatureUnifier;

impl DualNatureUnifier {
    /// Create a new unifier
    pub fn new() -> Self {
        Self
    }
}

impl AccountUnifier for DualNatureUnifier {
    fn unify(
        &self,
        dual_keys: &[String],
        target_accounts: Vec<AccountAggregate>,
    ) -> Vec<AccountAggregate> {
        // Slots keep the supplied order of the accounts nobody claims
        let mut slots: Vec<Option<AccountAggregate>> = Vec::with_capacity(target_accounts.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(target_accounts.len());
        for account in target_accounts {
            if let Some(previous) = index.insert(account.group_key.clone(), slots.len()) {
                slots[previous] = None;
            }
            slots.push(Some(account));
        }

        let mut take = |code: &str| {
            index
                .remove(code)
                .and_then(|slot| slots.get_mut(slot).and_then(Option::take))
        };

        let mut unified = Vec::new();
        for dual_key in dual_keys {
            let debit = take(&transcoder::to_debit_code(dual_key));
            let credit = take(&transcoder::to_credit_code(dual_key));
            if debit.is_none() && credit.is_none() {
                continue;
            }

            let halves = [debit, credit];
            let present = halves.iter().flatten();
            let balance: BigDecimal = present.clone().map(|a| &a.balance).sum();
            let turnover: BigDecimal = present.map(|a| &a.turnover).sum();

            tracing::trace!(
                dual_key = %dual_key,
                halves = halves.iter().flatten().count(),
                "unified dual-nature account"
            );
            unified.push(AccountAggregate::new(dual_key.clone(), balance, turnover, 0));
        }

        unified.extend(slots.into_iter().flatten());
        unified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(key: &str, balance: i64, turnover: i64) -> AccountAggregate {
        AccountAggregate::new(key, BigDecimal::from(balance), BigDecimal::from(turnover), 0)
    }

    #[test]
    fn test_no_dual_keys_returns_target_accounts() {
        let accounts = vec![
            aggregate("AAAAAAAAAA", 1, 1),
            aggregate("BBBBBBBBBB", 2, 2),
        ];

        let result = DualNatureUnifier.unify(&[], accounts.clone());

        assert_eq!(result, accounts);
    }

    #[test]
    fn test_dual_key_unifies_and_consumes_halves() {
        let dual_key = "CCCCCDDDDD".to_string();
        let accounts = vec![
            aggregate("CCCCCCCCCC", 5, 1),
            aggregate("DDDDDDDDDD", 3, 2),
            aggregate("EEEEEEEEEE", 9, 9),
        ];

        let result = DualNatureUnifier.unify(std::slice::from_ref(&dual_key), accounts);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0], aggregate("CCCCCDDDDD", 8, 3));
        assert_eq!(result[1], aggregate("EEEEEEEEEE", 9, 9));
    }

    #[test]
    fn test_partial_dual_key_counts_missing_half_as_zero() {
        let dual_key = "EEEEEFFFFF".to_string();
        let accounts = vec![aggregate("EEEEEEEEEE", 7, 0)];

        let result = DualNatureUnifier.unify(&[dual_key], accounts);

        assert_eq!(result, vec![aggregate("EEEEEFFFFF", 7, 0)]);
    }

    #[test]
    fn test_dual_key_without_target_halves_is_skipped() {
        let accounts = vec![aggregate("ZZZZZZZZZZ", 4, 4)];

        let result = DualNatureUnifier.unify(&["XXXXXYYYYY".to_string()], accounts.clone());

        assert_eq!(result, accounts);
    }

    #[test]
    fn test_repeated_dual_key_is_unified_once() {
        let key = "CCCCCDDDDD".to_string();
        let accounts = vec![aggregate("CCCCCCCCCC", 5, 0)];

        let result = DualNatureUnifier.unify(&[key.clone(), key], accounts);

        assert_eq!(result, vec![aggregate("CCCCCDDDDD", 5, 0)]);
    }

    #[test]
    fn test_duplicate_target_key_keeps_latest() {
        let accounts = vec![
            aggregate("AAAAAAAAAA", 1, 0),
            aggregate("BBBBBBBBBB", 2, 0),
            aggregate("AAAAAAAAAA", 3, 0),
        ];

        let result = DualNatureUnifier.unify(&[], accounts);

        assert_eq!(
            result,
            vec![aggregate("BBBBBBBBBB", 2, 0), aggregate("AAAAAAAAAA", 3, 0)]
        );
    }
}
