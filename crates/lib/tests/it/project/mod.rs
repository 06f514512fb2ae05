//! Project façade integration tests
//!
//! Building projects from scratch, editing loaded ones and rewriting their
//! identifiers.

mod editing;
mod rekey;
mod scaffold;
