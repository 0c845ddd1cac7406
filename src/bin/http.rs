#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use makeup_calendar::{HeatmapConfig, SimulationParams, http_api, logging};

    logging::init("info");

    let addr: SocketAddr = std::env::var("MAKEUP_CALENDAR_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    tracing::info!(%addr, "makeup-calendar HTTP API listening");
    let state = http_api::AppState::new(SimulationParams::default(), HeatmapConfig::default());
    http_api::serve(addr, state).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
