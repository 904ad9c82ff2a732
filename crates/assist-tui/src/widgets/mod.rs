pub mod pane_chrome;
pub mod status_bar;
pub mod text_area;
pub mod text_field;
pub mod toast;
