mod cors;
mod error_handler;

pub use cors::cors_layer;
pub use error_handler::log_errors;
