use axum::{
    Router,
    extract::Request,
    http::header,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;

use std::sync::Arc;

use crate::{ServerError, expense, recurring, share, summary};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Tenant key resolved for the current request.
///
/// The auth middleware inserts it as an extension, so handlers never see
/// the raw credential.
#[derive(Clone, Debug)]
pub struct Tenant(pub String);

async fn auth(mut request: Request, next: Next) -> Result<Response, ServerError> {
    let credential = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    let tenant = engine::resolve_identity(credential)?;
    request.extensions_mut().insert(Tenant(tenant));

    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    // Share links must work for recipients without any credential, so the
    // two read endpoints stay outside the auth layer.
    let shared = Router::new()
        .route("/shared/{token}", get(share::get_shared))
        .route("/shared/{token}/attachment", get(share::get_shared_attachment));

    Router::new()
        .route("/add", post(expense::add))
        .route("/list/", get(expense::list))
        .route("/{expense_id}", get(expense::get))
        .route("/delete/{expense_id}", delete(expense::delete))
        .route("/summary/", get(summary::total))
        .route("/summary/{month}", get(summary::month))
        .route("/attachment/{expense_id}", get(expense::get_attachment))
        .route("/share/{expense_id}", post(share::create))
        .route("/shared/{token}/clone", post(share::clone_shared))
        .route("/recurring/add", post(recurring::add))
        .route("/recurring/list", get(recurring::list))
        .route("/recurring/delete/{recurring_id}", delete(recurring::delete))
        .route_layer(middleware::from_fn(auth))
        .merge(shared)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
