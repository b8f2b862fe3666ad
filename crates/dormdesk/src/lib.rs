//! # Dormdesk
//!
//! Headless client for the dormitory management backend.
//!
//! Dormdesk keeps the client-side state a dormitory front end needs (who
//! is logged in, which view they're on) and routes every backend call
//! through one pipeline that attaches credentials and reacts to failures
//! the same way everywhere.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dormdesk::prelude::*;
//!
//! # async fn demo() -> Result<(), DormdeskError> {
//! let client = DormClient::builder()
//!     .base_url("http://localhost:8000")
//!     .build(LogNotifier, FileStore::open("session.json")?)?;
//!
//! client.auth().login("admin", "admin123").await?;
//! let stats = client.admin().statistics().await?;
//! println!("{} students", stats.students.total);
//! client.auth().logout().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
mod client;
mod config;
mod error;
mod failure;
mod notify;
pub mod pipeline;

pub use client::{DormClient, DormClientBuilder};
pub use config::ClientConfig;
pub use error::DormdeskError;
pub use failure::{ApiFailure, FALLBACK_MESSAGE, Reaction};
pub use notify::{LogNotifier, MemoryNotifier, Notifier, Severity};

/// Everything needed to build a client and make calls.
pub mod prelude {
    pub use crate::{
        ApiFailure, ClientConfig, DormClient, DormClientBuilder, DormdeskError, LogNotifier,
        MemoryNotifier, Notifier, Severity,
    };
    pub use dormdesk_protocol::*;
    pub use dormdesk_router::{Navigation, RouteTable, Router};
    pub use dormdesk_session::{FileStore, KeyValueStore, MemoryStore, Session};
    pub use dormdesk_transport::{HttpRequest, HttpTransport, ReqwestTransport};
}
