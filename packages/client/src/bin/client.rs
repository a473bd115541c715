//! Terminal client for tsudoi group chats.
//!
//! Joins a group's WebSocket channel, polls the chat API as a fallback and sends
//! messages typed at the prompt. Reconnects every 5 seconds when the connection drops.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tsudoi-client -- --group-id 3 --user-id 7 --cookie "sessionid=...; csrftoken=..."
//! TSUDOI_GROUP_ID=3 TSUDOI_USER_ID=7 cargo run --bin tsudoi-client
//! ```

use clap::Parser;

use tsudoi_client::{config::Args, ui::run_chat};
use tsudoi_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_chat(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
