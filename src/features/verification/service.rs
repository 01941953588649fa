use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::core::error::AppError;
use crate::features::verification::dto::{
    VerificationResultDto, VerificationStatus, VerifyRequestDto,
};
use crate::features::verification::resolver::{MxRecord, MxResolver};
use crate::features::verification::validator;

/// Upper bound on exchange hostnames echoed back to the caller.
const MAX_MX_SERVERS: usize = 2;

#[async_trait]
pub trait MxLookup: Send + Sync {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, AppError>;
}

#[async_trait]
impl MxLookup for MxResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, AppError> {
        MxResolver::lookup_mx(self, domain).await
    }
}

pub struct VerificationService {
    mx_source: Arc<dyn MxLookup>,
}

impl VerificationService {
    pub fn new(mx_source: Arc<dyn MxLookup>) -> Self {
        Self { mx_source }
    }

    /// Validate the address syntax, then ask DNS whether its domain can
    /// receive mail. Lookup failures of any kind produce the negative
    /// result rather than an error response.
    pub async fn verify(
        &self,
        request: VerifyRequestDto,
    ) -> Result<VerificationResultDto, AppError> {
        let email = request.email.trim().to_string();

        let report = validator::check_format(&email);
        if !report.ok {
            return Err(AppError::bad_request(format!(
                "invalid email address: {}",
                report.reasons.join("; ")
            )));
        }

        let domain = validator::domain_part(&email).unwrap_or_default().to_string();
        let ascii_domain = validator::ascii_domain(&domain)
            .map_err(|_| AppError::bad_request("domain punycode conversion failed"))?;

        let records = match self.mx_source.lookup_mx(&ascii_domain).await {
            Ok(records) => records,
            Err(error) => {
                warn!(target: "verification", %error, domain = %ascii_domain, "MX lookup failed, reporting domain as undeliverable");
                Vec::new()
            }
        };

        let mx_found = !records.is_empty();
        let status = if mx_found {
            VerificationStatus::Valid
        } else {
            VerificationStatus::InvalidDomain
        };
        let mx_servers = records
            .into_iter()
            .take(MAX_MX_SERVERS)
            .map(|record| record.exchange)
            .collect();

        Ok(VerificationResultDto {
            email,
            format_valid: true,
            mx_found,
            status,
            domain,
            mx_servers,
        })
    }
}
