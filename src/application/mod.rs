//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Services: Command dispatch
//! - Errors: Layer-specific errors
//! - Messaging: Message parsing and inbound screening

pub mod errors;
pub mod messaging;
pub mod services;
