//! Route modules for the API surface.

pub mod health;
pub mod proof;
