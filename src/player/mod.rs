pub mod capability;
pub mod error;
pub mod event;
pub mod pipeline;
pub mod primitive;
