//! Message handling - inbound screening and command parsing

pub mod filter;
pub mod parser;

pub use filter::{screen, Inbound, InboundKind, SkipReason, Verdict};
pub use parser::MessageParser;
