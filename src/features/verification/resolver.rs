use std::time::Duration;

use trust_dns_resolver::TokioAsyncResolver;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};

use crate::config::AppConfig;
use crate::core::error::AppError;

/// One row of an MX answer. Only `exchange` reaches the wire; the preference
/// is kept for completeness and never used to reorder the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }
}

pub struct MxResolver {
    resolver: TokioAsyncResolver,
    lifetime: Duration,
}

impl MxResolver {
    pub fn new(config: &AppConfig) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = config.dns_timeout();
        // single attempt keeps the total retry budget equal to the per-query timeout
        opts.attempts = 1;

        Self {
            resolver: TokioAsyncResolver::tokio(ResolverConfig::default(), opts),
            lifetime: config.dns_timeout(),
        }
    }

    /// Query MX records for an ASCII domain, answer order preserved.
    pub async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, AppError> {
        let lookup = tokio::time::timeout(self.lifetime, self.resolver.mx_lookup(domain))
            .await
            .map_err(|_| AppError::upstream(format!("MX lookup for {domain} timed out")))?;

        match lookup {
            Ok(answer) => Ok(answer
                .iter()
                .map(|mx| {
                    MxRecord::new(
                        mx.preference(),
                        normalize_exchange(mx.exchange().to_utf8()),
                    )
                })
                .collect()),
            Err(error) => classify_miss(domain, error),
        }
    }
}

// NXDOMAIN, empty answers, and negative SOA responses are an ordinary miss;
// everything else surfaces as an upstream error.
fn classify_miss(domain: &str, error: ResolveError) -> Result<Vec<MxRecord>, AppError> {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => Ok(Vec::new()),
        _ => Err(AppError::upstream(format!(
            "MX lookup for {domain} failed: {error}"
        ))),
    }
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}
