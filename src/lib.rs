//! mispbot - Slack bot for looking up indicators in MISP
//!
//! This library turns chat commands such as `searchip 93.184.216.34` into
//! MISP searches and renders the matching events as defanged Slack mrkdwn,
//! following hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`lookup`): Commands, MISP events, the attribute filter and
//!   the pure rendering services
//! - **Application Layer** (`application`): The command use case and reply texts
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Slack intake, MISP client and reply presenters
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use mispbot::prelude::*;
//! use secrecy::SecretString;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<()> {
//! // Create adapters
//! let misp_client = MispClient::new(
//!     "https://misp.example.org",
//!     SecretString::from("api-key".to_string()),
//!     true,
//!     Duration::from_secs(30),
//! )?;
//!
//! // Create use case
//! let use_case = HandleCommandUseCase::new(
//!     misp_client,
//!     ResultRenderer::new("https://misp.example.org"),
//!     DEFAULT_SEARCH_TIMEOUT,
//! );
//!
//! // Execute
//! let reply = use_case.execute("searchip 93.184.216.34").await;
//! println!("{}", reply);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod lookup;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::inbound::{
        parse_payload, ListenerStats, SlackListener, SocketModeListener,
    };
    pub use crate::adapters::outbound::console::StdoutPresenter;
    pub use crate::adapters::outbound::network::{MispClient, SlackWebPresenter};
    pub use crate::application::dto::{InboundRequest, ReplyTarget, RequestSource};
    pub use crate::application::messages;
    pub use crate::application::use_cases::{HandleCommandUseCase, DEFAULT_SEARCH_TIMEOUT};
    pub use crate::lookup::domain::{
        decode_events, Attribute, Command, CommandKind, Event, IndicatorQuery, MispObject,
        SearchResult, SearchScope,
    };
    pub use crate::lookup::policies::AttributeFilter;
    pub use crate::lookup::services::{
        defang, format_timestamp, CommandRouter, ResultRenderer, ERROR_REPORT, NO_RESULTS,
    };
    pub use crate::ports::inbound::CommandPort;
    pub use crate::ports::outbound::{IndicatorRepository, ReplyPresenter};
    pub use crate::shared::{BotError, Result};
}
