pub mod account;
pub mod chat;
pub mod presence;
pub mod stats;
