use actix_web::{error::JsonPayloadError, post, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::GenerateRequestDto};

#[post("/api/generate")]
pub async fn generate(
    state: web::Data<AppState>,
    request: web::Json<GenerateRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner().into_request(state.max_attachment_bytes)?;
    let result = state.generation_service.generate(request).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// JSON extractor settings shared by the server and tests. Body errors are reported in
/// the same `{ error, code }` shape as every other failure.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let app_error = match err {
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    AppError::PayloadTooLarge(err.to_string())
                }
                other => AppError::ValidationError(other.to_string()),
            };
            app_error.into()
        })
}
