//! # Reconciliation Core
//!
//! Reconciliation of a legacy ledger against the ledger it is being migrated
//! into, where the two encode the chart of accounts differently.
//!
//! ## Features
//!
//! - **Account-code transcoding**: splitting a legacy dual-nature code into the
//!   debit and credit codes the current ledger stores
//! - **Account unification**: folding those split accounts back into one
//!   aggregate comparable with the legacy ledger
//! - **Hierarchical reconciliation**: a bounded drill-down that only expands
//!   branches whose balance or turnover disagree, reporting missing accounts and
//!   missing transactions at the leaf level
//! - **Turnover netting**: per-account period turnover from journal postings,
//!   with pooling of dual-nature account pairs
//! - **Repository abstraction**: both ledgers are read through async traits
//!
//! ## Quick Start
//!
//! ```rust
//! use reconciliation_core::utils::MemoryAccountRepository;
//! use reconciliation_core::ReconciliationEngine;
//!
//! # async fn demo() -> reconciliation_core::ReconciliationResult<()> {
//! let legacy = MemoryAccountRepository::new();
//! let current = MemoryAccountRepository::new();
//! let engine = ReconciliationEngine::new(legacy, current);
//!
//! let outcome = engine.run().await?;
//! assert!(outcome.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod coding;
pub mod reconciliation;
pub mod traits;
pub mod turnover;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use coding::transcoder;
pub use reconciliation::*;
pub use traits::*;
pub use turnover::*;
pub use types::*;
