//! Account code handling for the legacy chart of accounts

pub mod transcoder;

pub use transcoder::*;
