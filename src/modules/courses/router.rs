use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::state::AppState;

use super::controller::{
    delete_course, enroll_course, get_all_courses, get_course_by_id, get_course_by_symbol,
    get_courses_of_student, get_courses_of_teacher, get_students_of_course, place_course,
    unenroll_course, update_course_status,
};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/teacher/place-course", post(place_course))
        .route(
            "/teacher/update-course/update-status/{symbol}",
            patch(update_course_status),
        )
        .route("/teacher/courses", get(get_courses_of_teacher))
        .route("/student/enroll-course/{symbol}", patch(enroll_course))
        .route("/student/unenroll-course/{symbol}", patch(unenroll_course))
        .route("/student/courses", get(get_courses_of_student))
        .route("/all-courses", get(get_all_courses))
        .route("/get-course-id/{course_id}", get(get_course_by_id))
        .route("/get-course-sym/{symbol}", get(get_course_by_symbol))
        .route("/course-students/{symbol}", get(get_students_of_course))
        .route("/delete/{course_id}", delete(delete_course))
}
