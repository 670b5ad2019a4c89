pub mod client;
pub mod service;
pub mod types;

pub use client::*;
pub use service::*;
pub use types::*;
