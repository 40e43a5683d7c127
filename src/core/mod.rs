//! Core module - Request composition and response rendering
//!
//! This module provides:
//! - Request composition into either wire encoding
//! - Facet detection over open JSON payloads
//! - Table decoding for the three tabular encodings
//! - HTML escaping and link detection
//! - The card/report model and the rendering engine

pub mod facets;
pub mod html;
pub mod render;
pub mod report;
pub mod request;
pub mod table;
pub mod util;
