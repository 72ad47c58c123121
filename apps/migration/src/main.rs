//! Schema migration CLI for the Pressroom database.
//!
//! Reads `DATABASE_URL` from the environment (or `.env`), e.g.
//! `cargo run -p migration -- up`.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("info,sea_orm_migration=info")
        .init();

    cli::run_cli(migration::Migrator).await;
}
