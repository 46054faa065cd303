use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    check_authorization, get_all_users, get_user, login, refresh_token, signup,
};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/", get(check_authorization))
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/refresh", get(refresh_token))
        .route("/all-users", get(get_all_users))
        .route("/get-user/{user_id}", get(get_user))
}
