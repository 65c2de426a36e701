pub mod app;
pub mod flipbook_view;
pub mod nav_controls;
pub mod page_indicator;
pub mod status_overlay;
