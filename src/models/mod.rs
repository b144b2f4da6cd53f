//! Data models for Personio entities

mod attendance;
mod employee;
mod time_entry;

pub use attendance::*;
pub use employee::*;
pub use time_entry::*;
