// src/pid.rs

//! # PID Control Module
//!
//! This module provides compute functions and control data structures
//! to perform per-axis control calculations with `piddiy`.

pub mod pd;
pub use pd::*;
