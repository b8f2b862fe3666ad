//! `/students/...`: the logged-in student's own records.
//!
//! None of these take a student id. The backend works out who is asking
//! from the bearer token the pipeline attaches, so a student can only
//! ever see their own profile, room and bills.
//!
//! ## The `'a` lifetime
//!
//! `StudentApi` doesn't own a client; it borrows one (`&'a DormClient`).
//! `client.student()` hands out a short-lived view, typically used for a
//! single call and dropped at the end of the statement:
//!
//! ```ignore
//! let bills = client.student().bills(None).await?;
//! ```
//!
//! Because it's only a borrow, creating one costs nothing and it can't
//! outlive the client it came from (the compiler enforces this).

use dormdesk_protocol::{
    Bill, BillStatus, DormChangeRequest, DormChangeRequestCreate, Dormitory,
    MaintenanceRequest, MaintenanceRequestCreate, MaintenanceRequestEdit, MessageResponse,
    PasswordChange, Roommate, StudentProfile, StudentUpdate,
};
use dormdesk_session::KeyValueStore;
use dormdesk_transport::{HttpRequest, HttpTransport};

use super::with_json;
use crate::notify::Notifier;
use crate::{DormClient, DormdeskError};

pub struct StudentApi<'a, T: HttpTransport, N: Notifier, K: KeyValueStore> {
    client: &'a DormClient<T, N, K>,
}

impl<'a, T, N, K> StudentApi<'a, T, N, K>
where
    T: HttpTransport,
    N: Notifier,
    K: KeyValueStore,
{
    pub(crate) fn new(client: &'a DormClient<T, N, K>) -> Self {
        Self { client }
    }

    pub async fn profile(&self) -> Result<StudentProfile, DormdeskError> {
        self.client.call(HttpRequest::get("/students/profile")).await
    }

    pub async fn update_profile(&self, update: &StudentUpdate) -> Result<StudentProfile, DormdeskError> {
        let request = with_json(HttpRequest::put("/students/profile"), update)?;
        self.client.call(request).await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<MessageResponse, DormdeskError> {
        let request = with_json(HttpRequest::put("/students/password"), change)?;
        self.client.call(request).await
    }

    /// The student's assigned room. 404 if none is assigned yet.
    pub async fn dormitory(&self) -> Result<Dormitory, DormdeskError> {
        self.client.call(HttpRequest::get("/students/dormitory")).await
    }

    pub async fn roommates(&self) -> Result<Vec<Roommate>, DormdeskError> {
        self.client.call(HttpRequest::get("/students/roommates")).await
    }

    /// Looks up rooms by building and/or room number, e.g. to find the
    /// target of a dorm change.
    pub async fn available_dormitories(
        &self,
        building_no: Option<&str>,
        room_no: Option<&str>,
    ) -> Result<Vec<Dormitory>, DormdeskError> {
        let request = HttpRequest::get("/students/dormitories")
            .query_opt("building_no", building_no)
            .query_opt("room_no", room_no);
        self.client.call(request).await
    }

    /// Bills for the student's room, optionally filtered by status.
    pub async fn bills(&self, status: Option<BillStatus>) -> Result<Vec<Bill>, DormdeskError> {
        let request = HttpRequest::get("/students/bills").query_opt("status", status.map(BillStatus::as_str));
        self.client.call(request).await
    }

    pub async fn dorm_change_requests(&self) -> Result<Vec<DormChangeRequest>, DormdeskError> {
        self.client.call(HttpRequest::get("/students/dorm-change")).await
    }

    pub async fn request_dorm_change(
        &self,
        create: &DormChangeRequestCreate,
    ) -> Result<DormChangeRequest, DormdeskError> {
        let request = with_json(HttpRequest::post("/students/dorm-change"), create)?;
        self.client.call(request).await
    }

    pub async fn maintenance_requests(&self) -> Result<Vec<MaintenanceRequest>, DormdeskError> {
        self.client.call(HttpRequest::get("/students/maintenance")).await
    }

    pub async fn request_maintenance(
        &self,
        create: &MaintenanceRequestCreate,
    ) -> Result<MaintenanceRequest, DormdeskError> {
        let request = with_json(HttpRequest::post("/students/maintenance"), create)?;
        self.client.call(request).await
    }

    /// Edits a request that's still pending or in progress.
    pub async fn update_maintenance_request(
        &self,
        request_id: i64,
        edit: &MaintenanceRequestEdit,
    ) -> Result<MaintenanceRequest, DormdeskError> {
        let request = with_json(
            HttpRequest::put(format!("/students/maintenance/{request_id}")),
            edit,
        )?;
        self.client.call(request).await
    }
}
