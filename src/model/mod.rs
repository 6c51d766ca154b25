//! Landscape snapshot and finding types.
//!
//! These types mirror the snapshot JSON documents so every consumer (rules,
//! summary, rendering) reads the same typed shape.
mod finding;
mod snapshot;

pub use finding::{Finding, Severity};
pub use snapshot::{
    parse_timestamp, Certificate, LandscapeSnapshot, RfcConnection, SapSystem, SldEntry,
    TransportQueue,
};
