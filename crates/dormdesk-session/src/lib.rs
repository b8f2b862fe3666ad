//! Session state for Dormdesk.
//!
//! This crate holds the client's authentication state:
//!
//! 1. **Session**: who is logged in ([`Session`], [`Credentials`])
//! 2. **Store**: the single owner that reads, sets and clears it
//!    ([`SessionStore`])
//! 3. **Storage**: where it survives restarts ([`KeyValueStore`] trait,
//!    [`MemoryStore`], [`FileStore`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Router / Pipeline (above)  ← read the session, clear it on a 401
//!     ↕
//! Session Layer (this crate)  ← owns token, role, subject id
//!     ↕
//! Protocol Layer (below)  ← provides Role
//! ```

mod error;
mod session;
mod storage;
mod store;

pub use error::{SessionError, StorageError};
pub use session::{Credentials, Session};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{ROLE_KEY, SUBJECT_KEY, SessionStore, TOKEN_KEY};
