//! In-process HTTP fakes for client tests.

use axum::Router;
use tokio::net::TcpListener;

/// Bind a local port and serve the router built for that base URL.
pub async fn serve<F>(build: F) -> String
where
    F: FnOnce(String) -> Router,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let app = build(base.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base
}
