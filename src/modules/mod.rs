pub mod auth;
pub mod courses;
pub mod users;

pub use self::users::model::{Role, User};
