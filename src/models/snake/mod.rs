pub mod input_arbiter;
pub mod snake_body;
pub mod snake_game;
pub mod snapshot;
pub mod speed_curve;
pub mod types;
