//! Reconciliation of a legacy ledger against its migrated counterpart
//!
//! The legacy ledger stores some accounts as one dual-nature code while the
//! current ledger splits them into a debit code and a credit code. The engine
//! folds those splits back together with an [`AccountUnifier`](crate::AccountUnifier),
//! compares both ledgers level by level and drills only into the branches that
//! disagree.

pub mod config;
pub mod engine;
pub mod filter;
pub mod unifier;

pub use config::*;
pub use engine::*;
pub use filter::*;
pub use unifier::*;
