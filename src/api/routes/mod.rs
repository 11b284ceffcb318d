//! HTTP route handlers

pub mod cadastro;
pub mod datasets;
pub mod dimensoes;

use axum::response::Html;

/// `(name, methods, path)` per route; axum has no URL-map introspection,
/// so the listing is maintained alongside the router.
const ROUTES: &[(&str, &str, &str)] = &[
    ("list_routes", "GET", "/"),
    ("health_check", "GET", "/health"),
    ("anos_original", "GET", "/dimensoes/anos_original"),
    ("anos_projecoes", "GET", "/dimensoes/anos_projecoes"),
    ("locais", "GET", "/dimensoes/locais"),
    ("faixas", "GET", "/dimensoes/faixas"),
    ("sexos", "GET", "/dimensoes/sexos"),
    ("modelos", "GET", "/dimensoes/modelos"),
    ("original", "GET", "/original"),
    ("previsoes", "GET", "/previsoes"),
    ("metricas", "GET", "/metricas"),
    ("tabua_mortalidade", "GET", "/sigerip/tabua-mortalidade"),
    ("nacoes_unidas", "GET", "/nacoes_unidas"),
    ("cadastro", "POST", "/cadastro"),
];

/// GET /, a human-readable route listing
pub async fn index() -> Html<String> {
    let lines: Vec<String> = ROUTES
        .iter()
        .map(|(endpoint, methods, path)| {
            format!("Endpoint: {endpoint} | Métodos: [{methods}] | Caminho: {path}")
        })
        .collect();
    Html(lines.join("<br>"))
}
