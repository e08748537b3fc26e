#![cfg_attr(not(test), no_std)]

pub mod float_utils;
pub use float_utils::*;

pub mod euler_angles;
pub use euler_angles::*;

pub mod vector;
pub use vector::*;

pub mod quaternion;
pub use quaternion::*;

#[cfg(test)]
mod tests;

pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;
