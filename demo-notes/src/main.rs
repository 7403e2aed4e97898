use dotenvy::dotenv;

use ya_axum::{AppContext, DataStore, GENERIC_DATA_STORE_URL, notes_router};

mod server;
use server::{http_port, init_tracing, spawn_http_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing("demo_notes");

    let store = DataStore::connect(GENERIC_DATA_STORE_URL.as_str()).await?;
    ya_axum::init(&store).await?;

    let app = notes_router(AppContext::new(store));

    spawn_http_server(http_port(), app).await?;
    Ok(())
}
