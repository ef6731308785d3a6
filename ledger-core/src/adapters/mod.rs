//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - System and fixed clocks for the Clock port

pub mod clock;

pub use clock::{FixedClock, SystemClock};
