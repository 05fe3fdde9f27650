use std::env;
use tokio::net::TcpListener;

use mock_api::{app, cors_layer, state::MockState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let addr = env::var("MOCK_API_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let client_url = env::var("CLIENT_URL").ok();

    let state = MockState::seeded();
    let app = app(state, cors_layer(client_url.as_deref())?);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("mock users api listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
