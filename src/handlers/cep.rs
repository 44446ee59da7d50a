// src/handlers/cep.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{common::error::AppError, config::AppState, services::cep_service::CepLookupResult};

// GET /cep/{cep}
#[utoipa::path(
    get,
    path = "/cep/{cep}",
    tag = "Cep",
    responses(
        (status = 200, description = "Endereço resolvido via ViaCEP", body = CepLookupResult),
        (status = 400, description = "CEP malformado"),
        (status = 404, description = "CEP inexistente")
    )
)]
pub async fn lookup_cep(
    State(app_state): State<AppState>,
    Path(cep): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = app_state.cep_service.lookup(&cep).await?;
    Ok((StatusCode::OK, Json(result)))
}
