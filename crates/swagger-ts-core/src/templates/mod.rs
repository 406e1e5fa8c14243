//! Template handling for the generated client.

pub mod kind;
pub mod manager;

pub use kind::*;
pub use manager::*;
