// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{RawNamePair, Verdict, EvidenceVector, MatchThresholds, ReconcileSummary};
pub use requests::{ReconcileRequest, MatchPairRequest};
pub use responses::{ReconcileResponse, HealthResponse, ErrorResponse};
