// Presentation layer - HTTP surface of the builder and export servers
pub mod app_state;
pub mod handlers;
pub mod router;
