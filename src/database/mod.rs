pub mod connection;

pub use connection::{connect, ensure_indexes};
