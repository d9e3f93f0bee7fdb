//! Route table for the billing API

use super::controllers::{client, invoice, user};
use super::state::AppState;
use axum::http::Method;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the full application router
///
/// - GET /health
/// - /api/users/… : signup, login, refresh, logout, profile, my clients
/// - /api/clients/… : create, update, list invoices
/// - /api/invoices/… : create, pay, fetch
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/users", user_routes())
        .nest("/api/clients", client_routes())
        .nest("/api/invoices", invoice_routes())
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(user::signup_user))
        .route("/login", post(user::login_user))
        .route("/refresh", post(user::refresh_access_token))
        .route("/logout", post(user::logout_user))
        .route(
            "/profile",
            get(user::get_user_profile).put(user::update_user),
        )
        .route("/clients", get(user::get_my_clients))
        .route("/clients/{client_id}", get(user::get_single_client))
}

fn client_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(client::create_client))
        .route("/{client_id}", put(client::update_client))
        .route("/{client_id}/invoices", get(client::get_all_invoices))
}

fn invoice_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(invoice::create_invoice))
        .route("/{invoice_id}", get(invoice::get_invoice))
        .route("/{invoice_id}/pay", patch(invoice::confirm_invoice_payment))
}

/// Browser clients send the refresh cookie cross-site, so the origin is
/// mirrored rather than wildcarded.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(std::time::Duration::from_secs(3600))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "billing-rs"
    }))
}
