// LobsterBoard - dashboard generator library and servers
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
