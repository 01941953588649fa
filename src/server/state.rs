use std::sync::Arc;

use crate::features::verification::VerificationService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<VerificationService>,
}

impl AppState {
    pub fn new(service: Arc<VerificationService>) -> Self {
        Self { service }
    }
}
