//! Utility modules: timeouts, validation messages.

pub mod timeout;
pub mod validation;
