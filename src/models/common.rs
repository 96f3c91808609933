use serde::{Deserialize, Serialize};

/// Error body returned by every handler on failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
