pub mod app;
pub mod overlay;
pub mod video_view;
