//! Account registration endpoint

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::types::ApiError;

#[derive(Debug, Deserialize)]
pub struct CadastroRequest {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub uso: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CadastroResponse {
    pub mensagem: String,
    pub status: String,
    pub api_key: String,
}

/// POST /cadastro
///
/// Issues the key in the response body and also mails it to the new
/// account (best-effort).
pub async fn cadastro(
    State(state): State<AppState>,
    Json(body): Json<CadastroRequest>,
) -> Result<(StatusCode, Json<CadastroResponse>), ApiError> {
    let api_key = state
        .registration
        .register(
            body.nome.as_deref().unwrap_or(""),
            body.email.as_deref().unwrap_or(""),
            body.uso,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CadastroResponse {
            mensagem: "Usuário cadastrado com sucesso!".to_string(),
            status: "sucesso".to_string(),
            api_key,
        }),
    ))
}
