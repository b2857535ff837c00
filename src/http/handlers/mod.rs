pub mod auth;
pub mod marks;
pub mod students;
