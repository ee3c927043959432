//! Route handlers.

pub mod ambassadors;
pub mod exports;
pub mod health;
pub mod onboard;
