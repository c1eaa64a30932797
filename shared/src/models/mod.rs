//! Domain models for the Farm Advisor platform

mod crop;
mod detection;
mod irrigation;
mod water;
mod weather;

pub use crop::*;
pub use detection::*;
pub use irrigation::*;
pub use water::*;
pub use weather::*;
