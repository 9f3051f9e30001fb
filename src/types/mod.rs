//! Core types for Variantly.

pub mod content;
pub mod generation;
pub mod record;
pub mod requests;

pub use content::*;
pub use generation::*;
pub use record::*;
pub use requests::*;
