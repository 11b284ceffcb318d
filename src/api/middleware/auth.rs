//! API key authentication extractor

use std::collections::HashMap;

use axum::{
    extract::{FromRequestParts, Query},
    http::{header, request::Parts},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::User;

/// Extractor that requires a valid API key.
///
/// The token comes from `Authorization: Bearer <token>`, falling back to
/// an `api_key` query parameter. Rejection happens before the handler
/// body runs, so protected routes never touch the store without a valid
/// credential.
#[derive(Debug, Clone)]
pub struct RequireApiKey(pub User);

impl FromRequestParts<AppState> for RequireApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)
            .ok_or_else(|| ApiError::unauthorized("Chave de API ausente"))?;

        debug!(
            key_prefix = %token.chars().take(8).collect::<String>(),
            "Validating API key"
        );

        let user = state
            .api_keys
            .validate(&token)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::unauthorized("Chave de API inválida"))?;

        Ok(RequireApiKey(user))
    }
}

fn extract_token(parts: &Parts) -> Option<String> {
    if let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                let token = token.trim();
                if !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }

    let Ok(Query(params)) = Query::<HashMap<String, String>>::try_from_uri(&parts.uri) else {
        return None;
    };
    params.get("api_key").filter(|v| !v.is_empty()).cloned()
}
