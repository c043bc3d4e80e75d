pub mod session_runner;
pub mod snake_view_model;
