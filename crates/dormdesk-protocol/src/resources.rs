//! Backend resource payloads: students, dormitories, bills, and requests.
//!
//! Field names follow the backend's JSON exactly. Timestamps and dates are
//! kept as the ISO-8601 strings the backend sends; the client only
//! displays them.

use serde::{Deserialize, Deserializer, Serialize};

/// Monetary amounts arrive either as a JSON string (`"120.50"`, the
/// backend's decimal encoding) or as a number. Both become a string.
fn amount_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Amount::deserialize(deserializer)? {
        Amount::Text(s) => s,
        Amount::Number(n) => n.to_string(),
    })
}

// -- Students -------------------------------------------------------------

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRegistration {
    pub student_id: String,
    pub password: String,
    pub name: String,
    pub gender: String,
    pub nationality: String,
    pub college: String,
    pub enrollment_year: i32,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub student_id: String,
    pub name: String,
    pub gender: String,
    pub nationality: String,
    pub college: String,
    pub enrollment_year: i32,
    pub email: String,
    #[serde(default)]
    pub dorm_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Fields a student may change on their own profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Fields an admin may change on any student. Unset fields are omitted
/// from the body so the backend leaves them untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStudentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub college: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dorm_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roommate {
    pub student_id: String,
    pub name: String,
    pub gender: String,
    pub college: String,
    pub enrollment_year: i32,
}

/// `GET /admin/students/{id}`: the student plus their dormitory, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDetail {
    pub student: StudentProfile,
    #[serde(default)]
    pub dormitory: Option<Dormitory>,
}

// -- Dormitories ----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dormitory {
    pub dorm_id: i64,
    pub building_no: String,
    #[serde(default)]
    pub floor_no: Option<i32>,
    pub room_no: String,
    pub gender_type: String,
    pub total_beds: i32,
    pub occupied_beds: i32,
    /// Only present on the student's own dormitory view.
    #[serde(default)]
    pub available_beds: Option<i32>,
}

/// `GET /admin/dormitories/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DormitoryDetail {
    pub dormitory: Dormitory,
    pub students: Vec<StudentProfile>,
    pub vacancy: i32,
}

/// Filters for the admin dormitory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DormitoryFilter {
    pub building: Option<String>,
    pub gender_type: Option<String>,
    pub has_vacancy: Option<bool>,
}

/// Filters for the admin student listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub search: Option<String>,
    pub college: Option<String>,
    pub gender: Option<String>,
    pub enrollment_year: Option<i32>,
}

// -- Bills ----------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Unpaid,
    Paid,
    Overdue,
}

impl BillStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub bill_id: i64,
    pub dorm_id: i64,
    pub bill_type: String,
    #[serde(deserialize_with = "amount_string")]
    pub amount: String,
    pub billing_month: String,
    pub due_date: String,
    pub status: BillStatus,
    #[serde(default)]
    pub paid_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub room_no: Option<String>,
}

// -- Dorm change requests -------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DormChangeRequestCreate {
    pub target_dorm_id: i64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DormChangeRequest {
    pub request_id: i64,
    pub student_id: String,
    pub current_dorm_id: i64,
    pub target_dorm_id: i64,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: String,
    #[serde(default)]
    pub admin_id: Option<i64>,
    #[serde(default)]
    pub admin_comment: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Admin decision on a pending dorm change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Reject,
}

impl ReviewAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

// -- Maintenance ----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRequestCreate {
    pub issue_type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

/// A student's edit to one of their own pending requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRequestEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

/// An admin's status change and/or comment on a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRequestReview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    pub request_id: i64,
    pub student_id: String,
    pub dorm_id: i64,
    pub issue_type: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub admin_id: Option<i64>,
    #[serde(default)]
    pub admin_comment: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// -- Admin ----------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// `GET /admin/statistics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub students: StudentStats,
    pub dormitories: DormitoryStats,
    pub requests: RequestStats,
    pub bills: BillStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentStats {
    pub total: u64,
    pub with_dorm: u64,
    pub without_dorm: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DormitoryStats {
    pub total: u64,
    pub total_beds: u64,
    pub occupied_beds: u64,
    pub vacant_beds: u64,
    pub occupancy_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestStats {
    pub pending_dorm_changes: u64,
    pub pending_maintenance: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillStats {
    pub unpaid_count: u64,
    pub unpaid_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bill_amount_accepts_string_and_number() {
        let from_string: Bill = serde_json::from_str(
            r#"{"bill_id":1,"dorm_id":2,"bill_type":"water","amount":"12.50","billing_month":"2024-09","due_date":"2024-10-01","status":"unpaid"}"#,
        )
        .unwrap();
        assert_eq!(from_string.amount, "12.50");

        let from_number: Bill = serde_json::from_str(
            r#"{"bill_id":1,"dorm_id":2,"bill_type":"water","amount":12.5,"billing_month":"2024-09","due_date":"2024-10-01","status":"paid"}"#,
        )
        .unwrap();
        assert_eq!(from_number.amount, "12.5");
        assert_eq!(from_number.status, BillStatus::Paid);
    }

    #[test]
    fn test_admin_student_update_omits_unset_fields() {
        let update = AdminStudentUpdate {
            dorm_id: Some(7),
            ..AdminStudentUpdate::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "dorm_id": 7 }));
    }
}
