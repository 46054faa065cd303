use rollbook::modules::courses::state::CourseStatus;
use rollbook::modules::users::model::Role;
use rollbook::router::init_router;
use rollbook::state::AppState;
use rollbook_auth::{create_access_token, create_refresh_token};
use rollbook_config::{CorsConfig, JwtConfig};
use rollbook_core::hash_password;
use sqlx::PgPool;
use uuid::Uuid;

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[allow(dead_code)]
pub struct TestCourse {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
}

pub fn generate_unique_username() -> String {
    // Must stay within the app's 25-char username limit.
    let id = Uuid::new_v4().simple().to_string();
    format!("user-{}", &id[..16])
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn generate_unique_symbol() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("C{}", &id[..6])
}

/// Insert a user directly, bypassing the signup endpoint.
pub async fn create_test_user(pool: &PgPool, role: Role) -> TestUser {
    let username = generate_unique_username();
    let email = generate_unique_email();
    let password = "testpass123".to_string();
    let hashed = hash_password(&password).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (username, email, password, role)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(&username)
    .bind(&email)
    .bind(&hashed)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        username,
        email,
        password,
        role,
    }
}

/// Insert a course directly with the given seat counters and status.
#[allow(dead_code)]
pub async fn create_test_course(
    pool: &PgPool,
    teacher_id: Uuid,
    capacity: i32,
    enrollments: i32,
    status: CourseStatus,
) -> TestCourse {
    let symbol = generate_unique_symbol();
    // Must stay within the app's 40-char course name limit.
    let id = Uuid::new_v4().simple().to_string();
    let name = format!("Course {}", &id[..16]);

    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO courses (symbol, name, credit, capacity, enrollments, status, teacher_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id",
    )
    .bind(&symbol)
    .bind(&name)
    .bind(5)
    .bind(capacity)
    .bind(enrollments)
    .bind(status)
    .bind(teacher_id)
    .fetch_one(pool)
    .await
    .unwrap();

    TestCourse { id, symbol, name }
}

/// Insert an enrollment row directly (seat counters are up to the test).
#[allow(dead_code)]
pub async fn enroll_directly(pool: &PgPool, student_id: Uuid, course_id: Uuid) {
    sqlx::query("INSERT INTO enrollments (student_id, course_id) VALUES ($1, $2)")
        .bind(student_id)
        .bind(course_id)
        .execute(pool)
        .await
        .unwrap();
}

/// Bearer header value with a freshly minted access token for the user.
pub fn access_bearer(user: &TestUser) -> String {
    dotenvy::dotenv().ok();
    let jwt_config = JwtConfig::from_env();
    let token =
        create_access_token(user.id, &user.username, user.role.as_str(), &jwt_config).unwrap();
    format!("Bearer {}", token)
}

/// Bearer header value with a refresh token for the user.
#[allow(dead_code)]
pub fn refresh_bearer(user: &TestUser) -> String {
    dotenvy::dotenv().ok();
    let jwt_config = JwtConfig::from_env();
    let token =
        create_refresh_token(user.id, &user.username, user.role.as_str(), &jwt_config).unwrap();
    format!("Bearer {}", token)
}
