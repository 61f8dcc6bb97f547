pub mod confirm_dialog;
pub mod pagination;
pub mod request_row;
pub mod status_filter;
pub mod theme_toggle;
