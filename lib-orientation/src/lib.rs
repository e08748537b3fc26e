#![cfg_attr(not(test), no_std)]

pub use math::{EulerAngles, Quaternion, Vector};

pub mod clock;
pub use clock::*;

pub mod config;
pub use config::*;

pub mod error;
pub use error::*;

pub mod sample;
pub use sample::*;

pub mod source;
pub use source::*;

pub mod utils;
pub use utils::*;

pub mod estimator;
pub use estimator::*;

#[cfg(test)]
mod tests;
