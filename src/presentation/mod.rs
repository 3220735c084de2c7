// Presentation layer - HTTP surface of the viewer session
pub mod app_state;
pub mod handlers;
pub mod router;
