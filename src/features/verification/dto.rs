use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequestDto {
    pub email: String,
}

/// Wire-level outcome classification for a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Valid,
    InvalidDomain,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResultDto {
    pub email: String,
    pub format_valid: bool,
    pub mx_found: bool,
    pub status: VerificationStatus,
    pub domain: String,
    pub mx_servers: Vec<String>,
}
