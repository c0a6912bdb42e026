use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::models::domain::ReconcileSummary;

/// Response for the JSON reconcile endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileResponse {
    #[serde(rename = "batchId")]
    pub batch_id: String,
    pub rows: Vec<Map<String, Value>>,
    pub summary: ReconcileSummary,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
