//! Name Recon - farmer / PFMS name reconciliation
//!
//! This library decides, record by record, whether a freeform farmer name and
//! an authoritative registry name denote the same person. It builds a token
//! dictionary over the registry column, splits run-together names, strips
//! relational suffixes and combines lexical and phonetic signals through a
//! fixed threshold policy.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{NameMatcher, ReconcileResult, TokenDictionary, PhoneticEncoder, DoubleMetaphoneEncoder};
pub use models::{RawNamePair, EvidenceVector, Verdict, MatchThresholds, ReconcileSummary};
