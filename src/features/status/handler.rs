use axum::Json;

use crate::features::status::dto::ServiceStatusDto;

const STATUS_MESSAGE: &str = "Email Verifier is running. Use POST /verify to check emails.";

pub async fn handle_status() -> Json<ServiceStatusDto> {
    Json(ServiceStatusDto {
        status: "online".to_string(),
        message: STATUS_MESSAGE.to_string(),
    })
}
