//! Shared types for the recipe API
//!
//! Models exchanged over HTTP and the unified error scheme used by the
//! server and by any client talking to it.

pub mod error;
pub mod models;
pub mod util;
