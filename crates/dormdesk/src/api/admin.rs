//! `/admin/...`: management endpoints. Listings are paginated.

use dormdesk_protocol::{
    AdminProfileUpdate, AdminStudentUpdate, Bill, BillStatus, DormChangeRequest, Dormitory,
    DormitoryDetail, DormitoryFilter, MaintenanceRequest, MaintenanceRequestReview,
    MessageResponse, Page, PageRequest, ReviewAction, Statistics, StudentDetail, StudentFilter,
    StudentProfile,
};
use dormdesk_session::KeyValueStore;
use dormdesk_transport::{HttpRequest, HttpTransport};

use super::{paged, with_json};
use crate::notify::Notifier;
use crate::{DormClient, DormdeskError};

pub struct AdminApi<'a, T: HttpTransport, N: Notifier, K: KeyValueStore> {
    client: &'a DormClient<T, N, K>,
}

impl<'a, T, N, K> AdminApi<'a, T, N, K>
where
    T: HttpTransport,
    N: Notifier,
    K: KeyValueStore,
{
    pub(crate) fn new(client: &'a DormClient<T, N, K>) -> Self {
        Self { client }
    }

    pub async fn statistics(&self) -> Result<Statistics, DormdeskError> {
        self.client.call(HttpRequest::get("/admin/statistics")).await
    }

    // -- Students ---------------------------------------------------------

    pub async fn students(
        &self,
        filter: &StudentFilter,
        page: PageRequest,
    ) -> Result<Page<StudentProfile>, DormdeskError> {
        let request = HttpRequest::get("/admin/students")
            .query_opt("search", filter.search.as_deref())
            .query_opt("college", filter.college.as_deref())
            .query_opt("gender", filter.gender.as_deref())
            .query_opt("enrollment_year", filter.enrollment_year);
        self.client.call(paged(request, page)).await
    }

    pub async fn student(&self, student_id: &str) -> Result<StudentDetail, DormdeskError> {
        self.client
            .call(HttpRequest::get(format!("/admin/students/{student_id}")))
            .await
    }

    /// Only the fields set in `update` are sent.
    pub async fn update_student(
        &self,
        student_id: &str,
        update: &AdminStudentUpdate,
    ) -> Result<StudentProfile, DormdeskError> {
        let request = with_json(HttpRequest::put(format!("/admin/students/{student_id}")), update)?;
        self.client.call(request).await
    }

    // -- Dormitories ------------------------------------------------------

    pub async fn dormitories(
        &self,
        filter: &DormitoryFilter,
        page: PageRequest,
    ) -> Result<Page<Dormitory>, DormdeskError> {
        let request = HttpRequest::get("/admin/dormitories")
            .query_opt("building", filter.building.as_deref())
            .query_opt("gender_type", filter.gender_type.as_deref())
            .query_opt("has_vacancy", filter.has_vacancy);
        self.client.call(paged(request, page)).await
    }

    pub async fn dormitory(&self, dorm_id: i64) -> Result<DormitoryDetail, DormdeskError> {
        self.client
            .call(HttpRequest::get(format!("/admin/dormitories/{dorm_id}")))
            .await
    }

    // -- Dorm change requests ---------------------------------------------

    pub async fn dorm_change_requests(
        &self,
        status: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<DormChangeRequest>, DormdeskError> {
        let request =
            HttpRequest::get("/admin/dorm-change-requests").query_opt("status_filter", status);
        self.client.call(paged(request, page)).await
    }

    /// Approves or rejects a request. The decision and comment travel as
    /// query parameters, not a body.
    pub async fn process_dorm_change_request(
        &self,
        request_id: i64,
        action: ReviewAction,
        comment: Option<&str>,
    ) -> Result<DormChangeRequest, DormdeskError> {
        let request = HttpRequest::put(format!("/admin/dorm-change-requests/{request_id}"))
            .query("action", action.as_str())
            .query_opt("admin_comment", comment);
        self.client.call(request).await
    }

    // -- Maintenance ------------------------------------------------------

    pub async fn maintenance_requests(
        &self,
        status: Option<&str>,
        priority: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<MaintenanceRequest>, DormdeskError> {
        let request = HttpRequest::get("/admin/maintenance-requests")
            .query_opt("status_filter", status)
            .query_opt("priority", priority);
        self.client.call(paged(request, page)).await
    }

    pub async fn update_maintenance_request(
        &self,
        request_id: i64,
        review: &MaintenanceRequestReview,
    ) -> Result<MaintenanceRequest, DormdeskError> {
        let request = with_json(
            HttpRequest::put(format!("/admin/maintenance-requests/{request_id}")),
            review,
        )?;
        self.client.call(request).await
    }

    // -- Bills ------------------------------------------------------------

    pub async fn bills(
        &self,
        status: Option<BillStatus>,
        bill_type: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<Bill>, DormdeskError> {
        let request = HttpRequest::get("/admin/bills")
            .query_opt("status_filter", status.map(BillStatus::as_str))
            .query_opt("bill_type", bill_type);
        self.client.call(paged(request, page)).await
    }

    pub async fn update_bill_status(&self, bill_id: i64, status: BillStatus) -> Result<Bill, DormdeskError> {
        let request =
            HttpRequest::put(format!("/admin/bills/{bill_id}")).query("new_status", status.as_str());
        self.client.call(request).await
    }

    // -- Profile ----------------------------------------------------------

    pub async fn update_profile(&self, update: &AdminProfileUpdate) -> Result<MessageResponse, DormdeskError> {
        let request = with_json(HttpRequest::put("/admin/profile"), update)?;
        self.client.call(request).await
    }
}
