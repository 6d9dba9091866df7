// src/target/mod.rs
// =============================================================================
// Target address handling: normalize, validate and classify the one URL the
// user asked for.
// =============================================================================

mod address;

pub use address::{TargetAddress, TargetKind};
