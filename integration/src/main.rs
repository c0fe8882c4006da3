//! Minimal HTTP facade over `math_drill_gen`.
//!
//! Demonstrates how a service embeds the engine: profiles live behind a
//! [`practice::handler::ProfileStore`], tests are cached server-side so
//! answers never reach the client, and the leveling transition runs under
//! the store's write lock.

mod practice;

use std::sync::Arc;

use log::info;
use math_drill_gen::LevelTable;

use practice::handler::{new_state, MemoryStore};
use practice::routes::router;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let store = Arc::new(MemoryStore::new(LevelTable::default()));
    let app = router(new_state(store));

    let addr = "0.0.0.0:3000";
    info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
