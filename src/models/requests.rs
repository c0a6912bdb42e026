use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Request to reconcile a table of records
///
/// Each row is an arbitrary JSON object; the configured subject and
/// reference columns are read from it and every other column is echoed back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileRequest {
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
}

/// Request to evaluate a single name pair
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchPairRequest {
    #[validate(length(max = 512))]
    #[serde(alias = "farmer_name", rename = "farmerName", default)]
    pub farmer_name: String,
    #[validate(length(max = 512))]
    #[serde(alias = "pfms_farmer_name", rename = "pfmsFarmerName", default)]
    pub pfms_farmer_name: String,
    /// Known name fragments used to split run-together subject names
    #[validate(length(max = 10000))]
    #[serde(default)]
    pub dictionary: Vec<String>,
}
