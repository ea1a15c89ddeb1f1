pub mod surface;
pub mod time;
