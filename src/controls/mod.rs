pub mod controller;
pub mod pulse;
