mod handler;
mod model;

pub use handler::{get_messages, send_message};
