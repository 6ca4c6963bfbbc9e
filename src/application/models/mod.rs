pub mod snapshot;
pub mod user;
