pub mod file_panel;
pub mod help_overlay;
pub mod link_panel;
pub mod log_panel;
pub mod mode_bar;
pub mod result_view;
pub mod text_panel;
