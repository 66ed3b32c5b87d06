pub mod collector;
pub mod platform;
pub mod process;
pub mod snapshot;

pub use collector::{Collector, Sampler};
