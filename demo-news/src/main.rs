use chrono::{Duration, Utc};
use dotenvy::dotenv;

use ya_axum::{AppContext, DataStore, GENERIC_DATA_STORE_URL, news_router};
use ya_core::{NewNews, NewsStore};

mod server;
use server::{http_port, init_tracing, spawn_http_server};

/// Fill an empty news table so the home page has something to show
async fn seed_news(ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
    if NewsStore::count(&ctx.store).await? > 0 {
        return Ok(());
    }

    let today = Utc::now().date_naive();
    let items = (0..=ctx.news_count_on_home_page)
        .map(|i| NewNews {
            title: format!("Новость {i}"),
            text: "Просто текст.".to_string(),
            date: today - Duration::days(i as i64),
        })
        .collect();
    let created = NewsStore::bulk_create(&ctx.store, items).await?;

    tracing::info!("Seeded {} news items", created.len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_tracing("demo_news");

    let store = DataStore::connect(GENERIC_DATA_STORE_URL.as_str()).await?;
    ya_axum::init(&store).await?;

    let ctx = AppContext::new(store);
    seed_news(&ctx).await?;

    spawn_http_server(http_port(), news_router(ctx)).await?;
    Ok(())
}
