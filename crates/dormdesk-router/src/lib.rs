//! Client-side navigation for Dormdesk.
//!
//! Decides which view a user may enter, based on the route's declaration
//! and the current session.
//!
//! # Key types
//!
//! - [`RouteDescriptor`] / [`RouteAccess`]: what a view declares
//! - [`RouteTable`]: the static table, including static redirects
//! - [`decide`] / [`Decision`]: the pure navigation guard
//! - [`Router`]: follows redirects and commits the current location

mod error;
mod guard;
mod route;
mod router;
mod table;

pub use error::RouterError;
pub use guard::{Decision, decide};
pub use route::{LOGIN_PATH, REGISTER_PATH, RouteAccess, RouteDescriptor};
pub use router::{DEFAULT_MAX_REDIRECTS, Navigation, Router};
pub use table::{Resolved, RouteEntry, RouteTable, normalize};
