//! Headless front end for the critter engine.
//!
//! [`Driver`] wraps an engine with the run controls an interactive front end
//! needs; the `critter-sim` binary plays it on a timer.

pub mod driver;
pub mod telemetry;

pub use driver::Driver;
