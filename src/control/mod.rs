//! Control logic: the threshold decision and the ramp profile.

pub mod ramp;
pub mod threshold;
