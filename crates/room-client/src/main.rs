//! Room client entry point
//!
//! Run with:
//! ```bash
//! ROOM_ID=lobby cargo run -p room-client
//! ```
//!
//! Configuration is loaded from environment variables.

use room_client::RoomClient;
use room_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    // Run the client
    if let Err(e) = run().await {
        error!(error = %e, "Client failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting room client...");

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        room_id = %config.room_id,
        url = %config.ws_url(),
        "Configuration loaded"
    );

    // Connect and run until the server closes the connection
    let client = RoomClient::connect(&config).await?;
    client.closed().await?;

    Ok(())
}
