use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use email_verifier_api::core::error::AppError;
use email_verifier_api::features::verification::{
    MxLookup, MxRecord, VerificationService, VerificationStatus, VerifyRequestDto,
};

enum StubOutcome {
    Records(Vec<MxRecord>),
    Empty,
    Failure,
}

struct StubMxSource {
    outcome: StubOutcome,
    calls: Arc<Mutex<usize>>,
    last_domain: Arc<Mutex<Option<String>>>,
}

impl StubMxSource {
    fn new(outcome: StubOutcome) -> Self {
        Self {
            outcome,
            calls: Arc::new(Mutex::new(0)),
            last_domain: Arc::new(Mutex::new(None)),
        }
    }

    async fn call_count(&self) -> usize {
        *self.calls.lock().await
    }

    async fn queried_domain(&self) -> Option<String> {
        self.last_domain.lock().await.clone()
    }
}

#[async_trait]
impl MxLookup for StubMxSource {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, AppError> {
        *self.calls.lock().await += 1;
        *self.last_domain.lock().await = Some(domain.to_string());
        match &self.outcome {
            StubOutcome::Records(records) => Ok(records.clone()),
            StubOutcome::Empty => Ok(Vec::new()),
            StubOutcome::Failure => Err(AppError::upstream("simulated resolver timeout")),
        }
    }
}

fn service_with(stub: Arc<StubMxSource>) -> VerificationService {
    let mx_source: Arc<dyn MxLookup> = stub;
    VerificationService::new(mx_source)
}

fn request(email: &str) -> VerifyRequestDto {
    VerifyRequestDto {
        email: email.to_string(),
    }
}

#[tokio::test]
async fn verify_reports_first_two_exchanges_in_answer_order() {
    let stub = Arc::new(StubMxSource::new(StubOutcome::Records(vec![
        MxRecord::new(10, "mx1.example.com"),
        MxRecord::new(20, "mx2.example.com"),
        MxRecord::new(30, "mx3.example.com"),
    ])));
    let service = service_with(stub.clone());

    let result = service
        .verify(request("alice@example.com"))
        .await
        .expect("verification");

    assert_eq!(result.email, "alice@example.com");
    assert!(result.format_valid);
    assert!(result.mx_found);
    assert_eq!(result.status, VerificationStatus::Valid);
    assert_eq!(result.domain, "example.com");
    assert_eq!(result.mx_servers, vec!["mx1.example.com", "mx2.example.com"]);
    assert_eq!(stub.call_count().await, 1);
}

#[tokio::test]
async fn verify_reports_missing_mx_as_invalid_domain() {
    let stub = Arc::new(StubMxSource::new(StubOutcome::Empty));
    let service = service_with(stub.clone());

    let result = service
        .verify(request("bob@no-mail.example.org"))
        .await
        .expect("verification");

    assert!(!result.mx_found);
    assert_eq!(result.status, VerificationStatus::InvalidDomain);
    assert!(result.mx_servers.is_empty());
    assert_eq!(stub.call_count().await, 1);
}

#[tokio::test]
async fn verify_absorbs_resolver_failures() {
    let failing = Arc::new(StubMxSource::new(StubOutcome::Failure));
    let empty = Arc::new(StubMxSource::new(StubOutcome::Empty));

    let failed = service_with(failing)
        .verify(request("carol@example.net"))
        .await
        .expect("failure must not propagate");
    let missing = service_with(empty)
        .verify(request("carol@example.net"))
        .await
        .expect("verification");

    assert_eq!(failed.mx_found, missing.mx_found);
    assert_eq!(failed.status, missing.status);
    assert_eq!(failed.mx_servers, missing.mx_servers);
    assert_eq!(failed.domain, missing.domain);
    assert!(failed.format_valid);
}

#[tokio::test]
async fn verify_rejects_invalid_syntax_without_lookup() {
    let stub = Arc::new(StubMxSource::new(StubOutcome::Empty));
    let service = service_with(stub.clone());

    for email in ["not-an-email", "a@b@example.com", "user@localhost", "@example.com"] {
        let error = service
            .verify(request(email))
            .await
            .expect_err("syntax must be rejected");
        assert!(
            matches!(error, AppError::BadRequest(_)),
            "unexpected error for {email}: {error}"
        );
    }

    assert_eq!(stub.call_count().await, 0, "no DNS work for invalid input");
}

#[tokio::test]
async fn verify_echoes_domain_after_final_at() {
    let stub = Arc::new(StubMxSource::new(StubOutcome::Empty));
    let service = service_with(stub.clone());

    let result = service
        .verify(request("user.name+tag@mail.example.co.uk"))
        .await
        .expect("verification");

    assert_eq!(result.domain, "mail.example.co.uk");
    assert_eq!(stub.queried_domain().await.as_deref(), Some("mail.example.co.uk"));
}

#[tokio::test]
async fn verify_queries_punycode_form_of_idn_domain() {
    let stub = Arc::new(StubMxSource::new(StubOutcome::Empty));
    let service = service_with(stub.clone());

    let result = service
        .verify(request("alice@exämple.com"))
        .await
        .expect("verification");

    // response echoes the submitted domain, DNS sees the ASCII form
    assert_eq!(result.domain, "exämple.com");
    assert_eq!(
        stub.queried_domain().await.as_deref(),
        Some("xn--exmple-cua.com")
    );
}
