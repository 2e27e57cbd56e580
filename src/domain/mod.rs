// Domain layer - Widget, dashboard and stats models
pub mod dashboard;
pub mod markup;
pub mod stats;
pub mod widget;
