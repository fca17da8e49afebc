pub mod handlers;
pub mod sessions;
pub mod users;
