//! Parser tests
//!
//! Covers path structuring, array indices, opaque text passthrough, `OUTER`,
//! syntax errors, canonical rendering and the rewriting helpers.

mod arrays;
mod errors;
mod opaque_text;
mod outer;
mod resolution;
mod round_trip;
mod visitors;
