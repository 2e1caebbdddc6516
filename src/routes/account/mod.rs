mod handler;
mod model;

pub use handler::delete_account;
