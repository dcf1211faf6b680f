//! Replicator types

mod notification;
mod request;

pub use notification::*;
pub use request::*;
