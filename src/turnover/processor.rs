//! Net turnover calculation with pooling of dual-nature account pairs

use bigdecimal::BigDecimal;
use std::collections::{HashMap, HashSet};

use crate::types::*;

/// Net movement of one account over the period
#[derive(Debug, Clone, PartialEq)]
struct NetTurnover {
    amount: BigDecimal,
    nature: BalanceNature,
}

impl NetTurnover {
    fn zero() -> Self {
        Self {
            amount: BigDecimal::from(0),
            nature: BalanceNature::Debit,
        }
    }

    /// Ties between debit and credit totals resolve to credit
    fn from_totals(total_debit: &BigDecimal, total_credit: &BigDecimal) -> Self {
        if total_credit >= total_debit {
            Self {
                amount: total_credit - total_debit,
                nature: BalanceNature::Credit,
            }
        } else {
            Self {
                amount: total_debit - total_credit,
                nature: BalanceNature::Debit,
            }
        }
    }

    /// Combine the movements of both halves of a dual-nature pair
    fn pool(&self, other: &NetTurnover) -> NetTurnover {
        if self.nature == other.nature {
            return NetTurnover {
                amount: &self.amount + &other.amount,
                nature: self.nature,
            };
        }

        // Equal opposite movements cancel out; the first account's nature is kept
        let nature = if other.amount > self.amount {
            other.nature
        } else {
            self.nature
        };
        NetTurnover {
            amount: (&self.amount - &other.amount).abs(),
            nature,
        }
    }
}

/// Computes per-account turnover and closing differences for a period
///
/// Accounts naming each other through `opposite_account_code` are treated as
/// the two halves of one dual-nature account: their movements are pooled and
/// re-allocated, the first account absorbing up to its opening balance.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnoverProcessor;

impl TurnoverProcessor {
    /// Produce one result per balance, in input order
    pub fn process(
        balances: &[AccountBalanceInput],
        entries: &[JournalEntry],
    ) -> Vec<AccountTurnoverResult> {
        let net_by_account = Self::net_turnovers(entries);
        let net_of = |code: &str| {
            net_by_account
                .get(code)
                .cloned()
                .unwrap_or_else(NetTurnover::zero)
        };

        let mut position: HashMap<&str, usize> = HashMap::new();
        for (i, balance) in balances.iter().enumerate() {
            position.entry(balance.account_code.as_str()).or_insert(i);
        }

        let mut results: Vec<Option<AccountTurnoverResult>> = vec![None; balances.len()];
        let mut processed: HashSet<usize> = HashSet::new();

        for (i, balance) in balances.iter().enumerate() {
            if !processed.insert(i) {
                continue;
            }

            let partner = balance
                .opposite_account_code
                .as_deref()
                .and_then(|code| position.get(code).copied())
                .filter(|&j| j != i && !processed.contains(&j));

            match partner {
                Some(j) => {
                    processed.insert(j);
                    let opposite = &balances[j];
                    tracing::debug!(
                        account = %balance.account_code,
                        opposite = %opposite.account_code,
                        "pooling dual-nature pair"
                    );

                    let pool = net_of(&balance.account_code).pool(&net_of(&opposite.account_code));
                    let cap = if balance.opening_balance > BigDecimal::from(0) {
                        balance.opening_balance.clone()
                    } else {
                        BigDecimal::from(0)
                    };
                    let first_share = if pool.amount < cap {
                        pool.amount.clone()
                    } else {
                        cap
                    };
                    let second_share = &pool.amount - &first_share;

                    results[i] = Some(Self::build_result(balance, first_share, pool.nature));
                    results[j] = Some(Self::build_result(opposite, second_share, pool.nature));
                }
                None => {
                    let net = net_of(&balance.account_code);
                    let allocated = if balance.opening_balance > BigDecimal::from(0)
                        && balance.opening_balance < net.amount
                    {
                        balance.opening_balance.clone()
                    } else {
                        net.amount
                    };
                    results[i] = Some(Self::build_result(balance, allocated, net.nature));
                }
            }
        }

        results.into_iter().flatten().collect()
    }

    fn net_turnovers(entries: &[JournalEntry]) -> HashMap<&str, NetTurnover> {
        let mut totals: HashMap<&str, (BigDecimal, BigDecimal)> = HashMap::new();
        for entry in entries {
            let (debit, credit) = totals
                .entry(entry.account_code.as_str())
                .or_insert_with(|| (BigDecimal::from(0), BigDecimal::from(0)));
            *debit += &entry.total_debit;
            *credit += &entry.total_credit;
        }

        totals
            .into_iter()
            .map(|(code, (debit, credit))| (code, NetTurnover::from_totals(&debit, &credit)))
            .collect()
    }

    fn build_result(
        balance: &AccountBalanceInput,
        turnover: BigDecimal,
        turnover_nature: BalanceNature,
    ) -> AccountTurnoverResult {
        let opening = balance.normal_balance.signed(&balance.opening_balance);
        let movement = turnover_nature.signed(&turnover);
        let closing = balance.normal_balance.signed(&balance.closing_balance);

        let difference = opening + movement - closing;

        AccountTurnoverResult {
            account_code: balance.account_code.clone(),
            opening_balance: balance.opening_balance.clone(),
            opening_balance_nature: balance.normal_balance,
            total_turnover: turnover,
            total_turnover_nature: turnover_nature,
            closing_balance: balance.closing_balance.clone(),
            closing_balance_nature: balance.normal_balance,
            difference_nature: BalanceNature::of_signed(&difference),
            difference: difference.abs(),
        }
    }
}
