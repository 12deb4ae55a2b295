//! Step definitions for approval lifecycle scenarios.

pub mod world;

mod given;
mod then;
mod when;
