use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    AccessTokenResponse, LoginRequest, MessageResponse, SignupRequest, TokenPairResponse,
};
use crate::modules::courses::model::{Course, PlaceCourseRequest, UpdateStatusRequest};
use crate::modules::courses::state::CourseStatus;
use crate::modules::users::model::{Role, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::check_authorization,
        crate::modules::auth::controller::get_all_users,
        crate::modules::auth::controller::get_user,
        crate::modules::courses::controller::place_course,
        crate::modules::courses::controller::update_course_status,
        crate::modules::courses::controller::enroll_course,
        crate::modules::courses::controller::unenroll_course,
        crate::modules::courses::controller::get_all_courses,
        crate::modules::courses::controller::get_course_by_id,
        crate::modules::courses::controller::get_course_by_symbol,
        crate::modules::courses::controller::get_courses_of_teacher,
        crate::modules::courses::controller::get_courses_of_student,
        crate::modules::courses::controller::get_students_of_course,
        crate::modules::courses::controller::delete_course,
    ),
    components(
        schemas(
            User,
            Role,
            SignupRequest,
            LoginRequest,
            TokenPairResponse,
            AccessTokenResponse,
            MessageResponse,
            ErrorResponse,
            Course,
            CourseStatus,
            PlaceCourseRequest,
            UpdateStatusRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Signup, login, and token refresh"),
        (name = "Courses", description = "Course placement, enrollment, and queries")
    ),
    info(
        title = "Rollbook API",
        version = "0.1.0",
        description = "A course-enrollment REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
