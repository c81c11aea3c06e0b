//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Qr: Terminal QR rendering for pairing
//! - Adapters: Platform integrations (WhatsApp, console)

pub mod adapters;
pub mod config;
pub mod qr;
