//! Terminal client for the legal document explainer
//!
//! - [`client`]: HTTP calls to the explainer API
//! - [`session`]: upload/analysis/chat state machine
//! - [`command`]: REPL input parsing
//! - [`render`]: plain-text views of the session

pub mod client;
pub mod command;
pub mod render;
pub mod session;

pub use client::{ApiClient, ClientError};
pub use command::{Command, CommandError};
pub use session::{LoadedDocument, Phase, Session, SessionError, Tab};
