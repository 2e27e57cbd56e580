// Application layer - Dashboard generation and server use cases
pub mod composer;
pub mod config_repository;
pub mod dashboard_service;
pub mod edit_mode;
pub mod html_processing;
pub mod openclaw_service;
pub mod readme;
pub mod renderer;
pub mod stats_service;
pub mod stylesheet;
pub mod system_probe;
pub mod template;
pub mod widget_registry;
pub mod widgets;
