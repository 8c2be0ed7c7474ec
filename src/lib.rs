pub mod config;
pub mod context;
pub mod demo;
pub mod distribute;
pub mod error;
pub mod ops;
pub mod pipe;
pub mod source;
pub mod terminal;

// Re-export the stream constructors at the crate root
pub use source::*;
pub use context::{CancelHandle, StreamContext};
pub use error::{StreamError, StreamResult};
