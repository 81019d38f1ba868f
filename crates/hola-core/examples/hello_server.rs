// Demo greeting server.
//
//   cargo run --example hello_server --features native
//   curl -H 'Accept-Language: es,en;q=0.5' http://localhost:3456/

use hola_core::{serve, ConnectionTracker, GreetingConfig, ServerConfig, ServerState};
use std::sync::Arc;

#[tokio::main]
async fn main() -> hola_core::Result<()> {
    let state = Arc::new(ServerState::new(
        GreetingConfig::new().default_language("en"),
    )?);

    let config = ServerConfig {
        port: 3456,
        ..Default::default()
    };

    println!("greeting server on :{}", config.port);
    serve(config, state, Arc::new(ConnectionTracker::new())).await
}
