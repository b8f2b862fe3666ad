//! Wire protocol for Dormdesk.
//!
//! This crate defines the "language" the client and the backend speak:
//!
//! - **Types** ([`Role`], [`TokenResponse`], [`ErrorBody`], etc.) -
//!   the values that travel in request and response bodies.
//! - **Resources** ([`StudentProfile`], [`Bill`], ...): the backend's
//!   domain payloads, used by the call wrappers.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those values are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong doing so.
//!
//! # Architecture
//!
//! The protocol layer knows nothing about HTTP or sessions. It only knows
//! how to serialize and deserialize.
//!
//! ```text
//! Transport (bytes) → Protocol (typed payloads) → Pipeline / Session
//! ```

mod codec;
mod error;
mod resources;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use resources::{
    AdminProfileUpdate, AdminStudentUpdate, Bill, BillStats, BillStatus,
    DormChangeRequest, DormChangeRequestCreate, Dormitory, DormitoryDetail,
    DormitoryFilter, DormitoryStats, MaintenanceRequest,
    MaintenanceRequestCreate, MaintenanceRequestEdit,
    MaintenanceRequestReview, PasswordChange, RequestStats, ReviewAction,
    Roommate, Statistics, StudentDetail, StudentFilter, StudentProfile,
    StudentRegistration, StudentStats, StudentUpdate,
};
pub use types::{
    CurrentUser, ErrorBody, MessageResponse, Page, PageRequest, Role,
    TokenResponse,
};
