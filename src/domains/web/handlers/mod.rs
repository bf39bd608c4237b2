// HTML page handlers
pub mod page_handler;
