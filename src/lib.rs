// src/lib.rs

//! Sismo Crawler Library
//!
//! Fetches the latest earthquake reports from the IGP public endpoint
//! (HTML page or JSON API) and replaces a keyed store with the snapshot.

pub mod config;
pub mod error;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod models;
pub mod pipeline;
pub mod response;
pub mod services;
pub mod storage;
pub mod utils;
