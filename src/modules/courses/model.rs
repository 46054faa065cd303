use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::state::CourseStatus;

/// Course record as stored. `enrollments` and `status` are maintained
/// together by the enrollment state machine inside one transaction.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Course {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    pub credit: i32,
    pub capacity: i32,
    pub enrollments: i32,
    pub status: CourseStatus,
    pub teacher_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_status() -> CourseStatus {
    CourseStatus::Closed
}

/// Body of `POST /course/teacher/place-course`. Seat count and status are
/// optional; a freshly placed course defaults to empty and `CLOSED`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PlaceCourseRequest {
    #[validate(length(min = 1, max = 8, message = "symbol must be 1-8 characters"))]
    pub symbol: String,
    #[validate(length(min = 1, max = 40, message = "name must be 1-40 characters"))]
    pub name: String,
    #[validate(range(min = 0, message = "credit must not be negative"))]
    pub credit: i32,
    #[validate(range(min = 0, message = "capacity must not be negative"))]
    pub capacity: i32,
    #[serde(default)]
    #[validate(range(min = 0, message = "enrollments must not be negative"))]
    pub enrollments: i32,
    #[serde(default = "default_status")]
    pub status: CourseStatus,
}

/// Body of the status-update endpoint.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: CourseStatus,
}
