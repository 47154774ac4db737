use std::future::pending;

use axum::{
    Router,
    http::{StatusCode, header::CONTENT_TYPE},
    routing::get,
};
use tokio::net::TcpListener;

/// Serves `body` with `status` at `/products` on an ephemeral port, returns the URL to hit.
pub async fn serve_catalog(status: u16, body: &'static str) -> String {
    let status = StatusCode::from_u16(status).expect("Invalid status code");

    let app = Router::new().route(
        "/products",
        get(move || async move { (status, [(CONTENT_TYPE, "application/json")], body) }),
    );

    bind(app).await
}

/// Accepts requests at `/products` and never answers them.
pub async fn serve_stalled() -> String {
    let app = Router::new().route("/products", get(|| pending::<&'static str>()));

    bind(app).await
}

async fn bind(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = listener
        .local_addr()
        .expect("Test listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Test server stopped");
    });

    format!("http://{address}/products")
}
