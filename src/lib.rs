//! Home automation controller library.
//!
//! Exposes the pure-logic modules and the simulated hardware for the
//! binaries and for integration testing.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod sensors;
