//! Core types and data structures for the reconciliation system

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coding::transcoder;

/// Orientation of a monetary amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceNature {
    /// Debit side, carried as a positive signed amount
    Debit,
    /// Credit side, carried as a negative signed amount
    Credit,
}

impl BalanceNature {
    /// Apply this nature's sign to an unsigned amount
    pub fn signed(&self, amount: &BigDecimal) -> BigDecimal {
        match self {
            BalanceNature::Debit => amount.clone(),
            BalanceNature::Credit => -amount.clone(),
        }
    }

    /// Nature of a signed amount; zero counts as debit
    pub fn of_signed(value: &BigDecimal) -> Self {
        if *value >= BigDecimal::from(0) {
            BalanceNature::Debit
        } else {
            BalanceNature::Credit
        }
    }
}

/// Side of an individual posted transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Debit,
    Credit,
}

/// Summarized position of an account or account group at one hierarchy level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountAggregate {
    /// Variable-length account code; its length encodes the hierarchy depth
    pub group_key: String,
    /// Balance of the account group
    pub balance: BigDecimal,
    /// Period turnover of the account group
    pub turnover: BigDecimal,
    /// Hierarchy level the aggregate was produced for
    pub level: usize,
}

impl AccountAggregate {
    /// Create a new aggregate
    pub fn new(
        group_key: impl Into<String>,
        balance: BigDecimal,
        turnover: BigDecimal,
        level: usize,
    ) -> Self {
        Self {
            group_key: group_key.into(),
            balance,
            turnover,
            level,
        }
    }

    /// Whether the legacy code carries two different halves
    pub fn is_dual_nature_source(&self) -> bool {
        transcoder::is_dual_nature(&self.group_key)
    }

    /// Exact equality of balance and turnover; any difference, sign included, is a mismatch
    pub fn matches(&self, other: &AccountAggregate) -> bool {
        self.balance == other.balance && self.turnover == other.turnover
    }
}

/// An account present in the source ledger but absent from the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountDetail {
    /// Code the target ledger is expected to carry
    pub full_code: String,
    /// Whether the account is one half of a split dual-nature account
    pub is_dual_nature: bool,
    /// Expected normal balance of the target account
    pub normal_balance: BalanceNature,
    /// Balance carried over from the source, zero for split halves
    pub balance: BigDecimal,
}

/// One posted transaction as reported by either ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub account_code: String,
    pub amount: BigDecimal,
    pub currency: String,
    pub effective_date: NaiveDate,
    pub transaction_type: TransactionType,
    pub voucher_number: String,
    pub sequence: u32,
    /// Identity shared by both ledgers for the same posting
    pub transaction_id: Uuid,
}

impl TransactionRecord {
    /// Create a new transaction record with a fresh identifier
    pub fn new(
        account_code: impl Into<String>,
        amount: BigDecimal,
        currency: impl Into<String>,
        effective_date: NaiveDate,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            account_code: account_code.into(),
            amount,
            currency: currency.into(),
            effective_date,
            transaction_type,
            voucher_number: String::new(),
            sequence: 0,
            transaction_id: Uuid::new_v4(),
        }
    }

    /// Set the voucher number and line sequence
    pub fn with_voucher(mut self, voucher_number: impl Into<String>, sequence: u32) -> Self {
        self.voucher_number = voucher_number.into();
        self.sequence = sequence;
        self
    }

    /// Replace the identifier, e.g. to mirror a record already in the other ledger
    pub fn with_id(mut self, transaction_id: Uuid) -> Self {
        self.transaction_id = transaction_id;
        self
    }
}

/// Accumulated findings of a reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationOutcome {
    /// Accounts the target ledger is missing, in discovery order
    pub missing_account_infos: Vec<AccountDetail>,
    /// Source transactions the target ledger is missing, in discovery order
    pub missing_transaction_infos: Vec<TransactionRecord>,
}

impl ReconciliationOutcome {
    /// Create an empty outcome
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the findings of a nested run, keeping their order
    pub fn merge(&mut self, nested: ReconciliationOutcome) {
        self.missing_account_infos
            .extend(nested.missing_account_infos);
        self.missing_transaction_infos
            .extend(nested.missing_transaction_infos);
    }

    /// True when no discrepancy was found
    pub fn is_empty(&self) -> bool {
        self.missing_account_infos.is_empty() && self.missing_transaction_infos.is_empty()
    }
}

/// Balance snapshot of one account for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalanceInput {
    pub account_code: String,
    pub normal_balance: BalanceNature,
    pub opening_balance: BigDecimal,
    pub closing_balance: BigDecimal,
    pub currency: String,
    /// Paired account of a dual-nature split, if any
    pub opposite_account_code: Option<String>,
}

impl AccountBalanceInput {
    /// Create a balance snapshot without a paired account
    pub fn new(
        account_code: impl Into<String>,
        normal_balance: BalanceNature,
        opening_balance: BigDecimal,
        closing_balance: BigDecimal,
    ) -> Self {
        Self {
            account_code: account_code.into(),
            normal_balance,
            opening_balance,
            closing_balance,
            currency: String::new(),
            opposite_account_code: None,
        }
    }

    /// Name the paired account of a dual-nature split
    pub fn with_opposite(mut self, opposite_account_code: impl Into<String>) -> Self {
        self.opposite_account_code = Some(opposite_account_code.into());
        self
    }

    /// Set the currency of the snapshot
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

/// Summarized posting batch for one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub account_code: String,
    pub total_debit: BigDecimal,
    pub total_credit: BigDecimal,
    pub date: NaiveDate,
}

impl JournalEntry {
    /// Create a new journal entry
    pub fn new(
        account_code: impl Into<String>,
        total_debit: BigDecimal,
        total_credit: BigDecimal,
        date: NaiveDate,
    ) -> Self {
        Self {
            account_code: account_code.into(),
            total_debit,
            total_credit,
            date,
        }
    }
}

/// Period turnover and closing check for one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountTurnoverResult {
    pub account_code: String,
    pub opening_balance: BigDecimal,
    pub opening_balance_nature: BalanceNature,
    pub total_turnover: BigDecimal,
    pub total_turnover_nature: BalanceNature,
    pub closing_balance: BigDecimal,
    pub closing_balance_nature: BalanceNature,
    /// Absolute gap between opening plus turnover and closing
    pub difference: BigDecimal,
    pub difference_nature: BalanceNature,
}

/// Errors that can occur while reconciling
#[derive(Debug, thiserror::Error)]
pub enum ReconciliationError {
    #[error("Repository error: {0}")]
    Repository(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for reconciliation operations
pub type ReconciliationResult<T> = Result<T, ReconciliationError>;
