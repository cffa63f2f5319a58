pub mod handlers;
pub mod items;
pub mod listing;
pub mod status;
