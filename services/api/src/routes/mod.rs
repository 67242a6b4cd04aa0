//! API service routes

use axum::{
    Json, Router, middleware,
    response::IntoResponse,
    routing::{get, post, put},
};

use crate::middleware::{admin_middleware, auth_middleware};
use crate::state::AppState;

pub mod auth;
pub mod orders;
pub mod perfumes;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    // Admin order paths: auth first, then the role gate.
    let admin_routes = Router::new()
        .route(
            "/api/pedidos/admin/todos-pedidos",
            get(orders::admin_confirmed_orders),
        )
        .route("/api/pedidos/admin/todos", get(orders::admin_pending_orders))
        .route(
            "/api/pedidos/admin/confirmar/:id",
            put(orders::confirm_order),
        )
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let protected_routes = Router::new()
        .route(
            "/api/auth/perfil",
            get(auth::get_profile).put(auth::update_profile),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/perfumes", get(perfumes::list_perfumes))
        .route("/api/busqueda", get(perfumes::search_perfumes))
        .route(
            "/api/perfume",
            post(perfumes::create_perfume),
        )
        .route(
            "/api/perfume/:id",
            get(perfumes::get_perfume)
                .put(perfumes::update_perfume)
                .delete(perfumes::delete_perfume),
        )
        .route("/api/perfume/genero/:genero", get(perfumes::perfumes_by_genero))
        .route("/api/selecciones", get(perfumes::list_selecciones))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/pedidos", post(orders::create_order_batch))
        .route("/api/pedidos/:id", put(orders::update_order))
        .route("/api/pedidos/mis-pedidos", get(orders::my_orders))
        .route("/api/pedidos/temporales", post(orders::enrich_temporary_orders))
        .merge(admin_routes)
        .merge(protected_routes)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "¡API del Catálogo funcionando!"
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "catalog-api"
    }))
}
