//! Projector integration tests
//!
//! Round trips between documents and graphs, and the handling of documents
//! that cannot be hydrated.

mod packages;
mod round_trip;
mod validation;
