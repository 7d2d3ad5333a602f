//! Review message assembly.

pub mod catalog;
pub mod message;

pub use catalog::{MessageCatalog, MessageId};
pub use message::{build_message, TRACE_SET_ATTRIBUTE};
