//! Type definitions for the provider contract

pub mod options;
pub mod record;
pub mod reply;
