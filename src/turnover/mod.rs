//! Period turnover netting against balance snapshots

pub mod processor;

pub use processor::*;
