mod error;
mod handlers;
mod router;
mod types;

pub use router::router;
