//! Slack Command - Slash Command Receiver
//!
//! Receives Slack slash commands over HTTP, acknowledges them immediately and
//! exports the matching Qiita articles to a local JSON file in the background.
//! A follow-up message reports the outcome through the command's `response_url`.
//!
//! ```text
//! POST /slack/events ──► verify ──► parse ──► ack (200, ephemeral)
//!                                      │
//!                                      └─► tokio::spawn(execute)
//!                                             build url → fetch → format → write
//!                                             └─► POST response_url
//! ```

pub mod config;
pub mod handler;
pub mod payload;
pub mod respond;
pub mod signature;

pub use config::HandlerConfig;
pub use handler::{AppState, Outcome, execute, router};
pub use payload::{Inbound, SlashCommand};
pub use respond::{Responder, SlackMessage};
