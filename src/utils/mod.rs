//! Utility functions and helpers.

pub mod http;
pub mod json;

pub use json::str_field;
