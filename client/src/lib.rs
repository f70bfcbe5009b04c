//! msweeper Client Library
//!
//! This library provides a Rust client for the msweeper game service. Each
//! method maps onto one HTTP call and resolves to either the server's game
//! state or a uniform [`ErrorResult`], whatever the server or the network did.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use msweeper_client::MSweeperClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let client = MSweeperClient::new("http://127.0.0.1:9090")?;
//!
//!     // Start a default 9x9 game with 15 mines
//!     let game = client.new_game("player", None, None, None).await?;
//!
//!     match client.reveal_spot(&game.game_id, 0, 0).await {
//!         Ok(game) => println!("{}\n{}", game.game_status, game.minefield),
//!         Err(result) => println!("{}: {}", result.error.cause, result.error.message),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Testing
//!
//! The HTTP layer sits behind the [`Transport`] trait. Build a client with
//! [`MSweeperClient::with_transport`] to replay canned responses instead of
//! talking to a server.

mod client;
mod config;
mod error;
mod response;
mod transport;

pub use client::MSweeperClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, FallbackMessage};
pub use error::{ClientError, ErrorCause, ErrorDetail, ErrorResult, TransportError};
pub use response::{ErrorBody, ResponseNormalizer, cause_for_status};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

// Re-export common types for convenience
pub use msweeper_common::{models::*, protocol::*};
pub use reqwest::{Method, StatusCode};

/// Outcome of every game operation
pub type ApiResult<T> = std::result::Result<T, ErrorResult>;
