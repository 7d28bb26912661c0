// src/stabilizer.rs

//! # Tilt-Rotor Control Laws
//!
//! This module provides the control law interface and a PD implementation
//! that turns position and attitude error into five control efforts.

pub mod pd_tilt;
pub use pd_tilt::*;
pub mod tilt_stabilizer;
pub use tilt_stabilizer::*;
