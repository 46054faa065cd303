use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use rollbook_core::AppError;

use super::model::{Course, PlaceCourseRequest, UpdateStatusRequest};
use super::service::CourseService;
use crate::middleware::auth::{AuthUser, CurrentStudent, CurrentTeacher};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::User;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Place a new course owned by the calling teacher
#[utoipa::path(
    post,
    path = "/course/teacher/place-course",
    request_body = PlaceCourseRequest,
    responses(
        (status = 201, description = "Course placed successfully", body = Course),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a teacher", body = ErrorResponse),
        (status = 409, description = "Symbol or name already taken", body = ErrorResponse),
        (status = 422, description = "Validation error or enrollments > capacity", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, teacher, dto))]
pub async fn place_course(
    State(state): State<AppState>,
    teacher: CurrentTeacher,
    ValidatedJson(dto): ValidatedJson<PlaceCourseRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let teacher_id = teacher.0.user_id()?;
    let course = CourseService::place_course(&state.db, teacher_id, dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// Update a course's status (owning teacher only)
#[utoipa::path(
    patch,
    path = "/course/teacher/update-course/update-status/{symbol}",
    params(
        ("symbol" = String, Path, description = "Course symbol")
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Course),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not the owning teacher", body = ErrorResponse),
        (status = 404, description = "Unknown course symbol", body = ErrorResponse),
        (status = 409, description = "No free capacity to open", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, teacher, dto))]
pub async fn update_course_status(
    State(state): State<AppState>,
    teacher: CurrentTeacher,
    Path(symbol): Path<String>,
    ValidatedJson(dto): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<Course>, AppError> {
    let teacher_id = teacher.0.user_id()?;
    let course = CourseService::update_status(&state.db, teacher_id, &symbol, dto.status).await?;
    Ok(Json(course))
}

/// Enroll the calling student in a course
#[utoipa::path(
    patch,
    path = "/course/student/enroll-course/{symbol}",
    params(
        ("symbol" = String, Path, description = "Course symbol")
    ),
    responses(
        (status = 200, description = "Enrolled", body = Course),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a student", body = ErrorResponse),
        (status = 404, description = "Unknown course symbol", body = ErrorResponse),
        (status = 409, description = "Already enrolled, course full, or course closed", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, student))]
pub async fn enroll_course(
    State(state): State<AppState>,
    student: CurrentStudent,
    Path(symbol): Path<String>,
) -> Result<Json<Course>, AppError> {
    let student_id = student.0.user_id()?;
    let course = CourseService::enroll(&state.db, student_id, &symbol).await?;
    Ok(Json(course))
}

/// Unenroll the calling student from a course
#[utoipa::path(
    patch,
    path = "/course/student/unenroll-course/{symbol}",
    params(
        ("symbol" = String, Path, description = "Course symbol")
    ),
    responses(
        (status = 200, description = "Unenrolled", body = Course),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a student", body = ErrorResponse),
        (status = 404, description = "Unknown course symbol", body = ErrorResponse),
        (status = 409, description = "Not enrolled or course closed", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, student))]
pub async fn unenroll_course(
    State(state): State<AppState>,
    student: CurrentStudent,
    Path(symbol): Path<String>,
) -> Result<Json<Course>, AppError> {
    let student_id = student.0.user_id()?;
    let course = CourseService::unenroll(&state.db, student_id, &symbol).await?;
    Ok(Json(course))
}

/// List all courses (any authenticated caller)
#[utoipa::path(
    get,
    path = "/course/all-courses",
    responses(
        (status = 200, description = "All courses", body = [Course]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_all_courses(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::get_all_courses(&state.db).await?;
    Ok(Json(courses))
}

/// Fetch one course by id (teachers only)
#[utoipa::path(
    get,
    path = "/course/get-course-id/{course_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course details", body = Course),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a teacher", body = ErrorResponse),
        (status = 404, description = "Unknown course id", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _teacher))]
pub async fn get_course_by_id(
    State(state): State<AppState>,
    _teacher: CurrentTeacher,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::get_course_by_id(&state.db, course_id).await?;
    Ok(Json(course))
}

/// Fetch one course by symbol (any authenticated caller)
#[utoipa::path(
    get,
    path = "/course/get-course-sym/{symbol}",
    params(
        ("symbol" = String, Path, description = "Course symbol")
    ),
    responses(
        (status = 200, description = "Course details", body = Course),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Unknown course symbol", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_course_by_symbol(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(symbol): Path<String>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::get_course_by_symbol(&state.db, &symbol).await?;
    Ok(Json(course))
}

/// List the calling teacher's courses
#[utoipa::path(
    get,
    path = "/course/teacher/courses",
    responses(
        (status = 200, description = "Courses owned by the caller", body = [Course]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a teacher", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, teacher))]
pub async fn get_courses_of_teacher(
    State(state): State<AppState>,
    teacher: CurrentTeacher,
) -> Result<Json<Vec<Course>>, AppError> {
    let teacher_id = teacher.0.user_id()?;
    let courses = CourseService::get_courses_of_teacher(&state.db, teacher_id).await?;
    Ok(Json(courses))
}

/// List the calling student's enrolled courses
#[utoipa::path(
    get,
    path = "/course/student/courses",
    responses(
        (status = 200, description = "Courses the caller is enrolled in", body = [Course]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not a student", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, student))]
pub async fn get_courses_of_student(
    State(state): State<AppState>,
    student: CurrentStudent,
) -> Result<Json<Vec<Course>>, AppError> {
    let student_id = student.0.user_id()?;
    let courses = CourseService::get_courses_of_student(&state.db, student_id).await?;
    Ok(Json(courses))
}

/// List students enrolled in a course (owning teacher only)
#[utoipa::path(
    get,
    path = "/course/course-students/{symbol}",
    params(
        ("symbol" = String, Path, description = "Course symbol")
    ),
    responses(
        (status = 200, description = "Enrolled students", body = [User]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not the owning teacher", body = ErrorResponse),
        (status = 404, description = "Unknown course symbol", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, teacher))]
pub async fn get_students_of_course(
    State(state): State<AppState>,
    teacher: CurrentTeacher,
    Path(symbol): Path<String>,
) -> Result<Json<Vec<User>>, AppError> {
    let teacher_id = teacher.0.user_id()?;
    let students = CourseService::get_students_of_course(&state.db, teacher_id, &symbol).await?;
    Ok(Json(students))
}

/// Delete a course by id (owning teacher only)
#[utoipa::path(
    delete,
    path = "/course/delete/{course_id}",
    params(
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not the owning teacher", body = ErrorResponse),
        (status = 404, description = "Unknown course id", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, teacher))]
pub async fn delete_course(
    State(state): State<AppState>,
    teacher: CurrentTeacher,
    Path(course_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let teacher_id = teacher.0.user_id()?;
    CourseService::delete_course(&state.db, teacher_id, course_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
