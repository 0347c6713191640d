use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{extract::State, routing::get, Router};

use crate::AppContext;

/// `GET /` → „Bot {name} is operational” (hosting sprawdza, czy proces żyje).
pub fn router(app: Arc<AppContext>) -> Router {
    Router::new().route("/", get(status)).with_state(app)
}

async fn status(State(app): State<Arc<AppContext>>) -> String {
    format!("Bot {} is operational", app.bot_name())
}

pub async fn serve(app: Arc<AppContext>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", app.settings.health.host, app.settings.health.port)
        .parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "liveness endpoint listening");
    axum::serve(listener, router(app)).await?;
    Ok(())
}
