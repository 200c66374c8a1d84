use std::net::SocketAddr;

use portfolio_tracker::{config, routes, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();
    let state = AppState::from_settings(settings.clone());
    let app = routes::app(state);

    let ip = match settings.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::error!("invalid HOST {}: {e}", settings.host);
            std::process::exit(1);
        }
    };
    let addr = SocketAddr::from((ip, settings.port));
    tracing::info!("listening on http://{}", addr);
    tracing::info!("price service at {}", settings.price_api_url);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
    }
}
