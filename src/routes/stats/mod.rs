mod handler;
mod model;

pub use handler::{init_stats, track_visit};
