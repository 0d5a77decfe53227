pub mod confirm_dialog;
pub mod form;
pub mod guard;
pub mod layout;
pub mod modal;
pub mod nav_tabs;
pub mod pagination;
pub mod upload;
