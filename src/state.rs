// src/state.rs

//! # Vehicle State Store
//!
//! Holds the latest setpoint and vehicle feedback. Each field group is
//! written by exactly one update operation and the values are
//! last-writer-wins. All operations take `&self`, so one store can be shared
//! between threads or async tasks that deliver data and the control tick
//! that reads it.
//!
//! Updates never wait for the lock. An update that finds the store busy is
//! dropped and returns `false`; the next message of the same kind carries a
//! fresher value anyway. The control tick reads through
//! [`StateStore::try_snapshot`], which copies every field group under a
//! single lock acquisition and also returns immediately when the store is
//! busy. [`StateStore::snapshot`] spins for the lock and is meant for
//! threads that cannot preempt a writer.
//!
//! Updates carrying non-finite values, or a degenerate orientation
//! quaternion, are rejected and the previous value is kept.

use crate::orientation::Quaternion;
use crate::{Number, Real};
use core::sync::atomic::{AtomicBool, Ordering};
use log::warn;
use spin::{Mutex, MutexGuard};

/// Position in meters, local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position<T> {
    /// North/forward.
    pub x: T,
    /// East/left, depending on frame.
    pub y: T,
    /// Vertical. Stored but not controlled.
    pub z: T,
}

/// Linear velocity in m/s, same frame as [`Position`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearVelocity<T> {
    /// Velocity along x.
    pub vx: T,
    /// Velocity along y.
    pub vy: T,
    /// Velocity along z.
    pub vz: T,
}

/// Body frame angular velocity in rad/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyRates<T> {
    /// Roll rate.
    pub p: T,
    /// Pitch rate.
    pub q: T,
    /// Yaw rate.
    pub r: T,
}

impl<T: Number> Position<T> {
    /// Creates a position.
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// The origin.
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }
}

impl<T: Number> LinearVelocity<T> {
    /// Creates a velocity.
    pub fn new(vx: T, vy: T, vz: T) -> Self {
        Self { vx, vy, vz }
    }

    /// At rest.
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }
}

impl<T: Number> BodyRates<T> {
    /// Creates body rates.
    pub fn new(p: T, q: T, r: T) -> Self {
        Self { p, q, r }
    }

    /// Not rotating.
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }
}

/// Desired position and orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Setpoint<T> {
    /// Desired position.
    pub position: Position<T>,
    /// Desired orientation.
    pub orientation: Quaternion<T>,
}

/// Measured vehicle state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState<T> {
    /// Current position.
    pub position: Position<T>,
    /// Current orientation.
    pub orientation: Quaternion<T>,
    /// Current linear velocity.
    pub linear_velocity: LinearVelocity<T>,
    /// Current body rates.
    pub body_rates: BodyRates<T>,
}

/// A consistent copy of the setpoint and vehicle state for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateSnapshot<T> {
    /// Desired state.
    pub setpoint: Setpoint<T>,
    /// Measured state.
    pub vehicle: VehicleState<T>,
}

impl<T: Number> StateSnapshot<T> {
    /// Identity orientations, zero positions, zero velocities and rates.
    pub fn new() -> Self {
        Self {
            setpoint: Setpoint {
                position: Position::zero(),
                orientation: Quaternion::identity(),
            },
            vehicle: VehicleState {
                position: Position::zero(),
                orientation: Quaternion::identity(),
                linear_velocity: LinearVelocity::zero(),
                body_rates: BodyRates::zero(),
            },
        }
    }
}

impl<T: Number> Default for StateSnapshot<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn finite3<T: Real>(a: T, b: T, c: T) -> bool {
    a.is_finite() && b.is_finite() && c.is_finite()
}

/// Shared store for setpoints and feedback.
pub struct StateStore<T> {
    inner: Mutex<StateSnapshot<T>>,
    has_data: AtomicBool,
}

impl<T: Real> StateStore<T> {
    /// Creates a store holding the default state.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StateSnapshot::new()),
            has_data: AtomicBool::new(false),
        }
    }

    /// Overwrites the desired orientation.
    ///
    /// Returns `false` and keeps the previous value if the quaternion is
    /// not finite or is degenerate, or if the store is busy.
    pub fn update_target_attitude(&self, orientation: Quaternion<T>) -> bool {
        if !orientation.is_valid() {
            warn!("rejected target attitude: invalid quaternion");
            return false;
        }
        let Some(mut state) = self.try_write("target attitude") else {
            return false;
        };
        state.setpoint.orientation = orientation;
        drop(state);
        self.mark_received();
        true
    }

    /// Overwrites the desired position.
    pub fn update_target_position(&self, position: Position<T>) -> bool {
        if !finite3(position.x, position.y, position.z) {
            warn!("rejected target position: non-finite value");
            return false;
        }
        let Some(mut state) = self.try_write("target position") else {
            return false;
        };
        state.setpoint.position = position;
        drop(state);
        self.mark_received();
        true
    }

    /// Overwrites the current position and orientation together.
    pub fn update_vehicle_pose(&self, position: Position<T>, orientation: Quaternion<T>) -> bool {
        if !finite3(position.x, position.y, position.z) || !orientation.is_valid() {
            warn!("rejected vehicle pose: non-finite position or invalid quaternion");
            return false;
        }
        let Some(mut state) = self.try_write("vehicle pose") else {
            return false;
        };
        state.vehicle.position = position;
        state.vehicle.orientation = orientation;
        drop(state);
        self.mark_received();
        true
    }

    /// Overwrites the current linear velocity and body rates together.
    pub fn update_vehicle_rates(
        &self,
        linear_velocity: LinearVelocity<T>,
        body_rates: BodyRates<T>,
    ) -> bool {
        let LinearVelocity { vx, vy, vz } = linear_velocity;
        let BodyRates { p, q, r } = body_rates;
        if !finite3(vx, vy, vz) || !finite3(p, q, r) {
            warn!("rejected vehicle rates: non-finite value");
            return false;
        }
        let Some(mut state) = self.try_write("vehicle rates") else {
            return false;
        };
        state.vehicle.linear_velocity = linear_velocity;
        state.vehicle.body_rates = body_rates;
        drop(state);
        self.mark_received();
        true
    }

    /// Copies the whole state under one lock acquisition, or `None` if a
    /// writer holds the lock. Never waits.
    pub fn try_snapshot(&self) -> Option<StateSnapshot<T>> {
        self.inner.try_lock().map(|state| *state)
    }

    /// Copies the whole state under one lock acquisition, spinning while a
    /// writer holds the lock.
    pub fn snapshot(&self) -> StateSnapshot<T> {
        *self.inner.lock()
    }

    /// `true` once any update has been accepted. Never reset.
    pub fn has_data(&self) -> bool {
        self.has_data.load(Ordering::Acquire)
    }

    fn mark_received(&self) {
        self.has_data.store(true, Ordering::Release);
    }

    fn try_write(&self, what: &str) -> Option<MutexGuard<'_, StateSnapshot<T>>> {
        let state = self.inner.try_lock();
        if state.is_none() {
            warn!("dropped {} update: store busy", what);
        }
        state
    }

    /// Holds the lock the way an interrupted reader or writer would.
    #[cfg(test)]
    pub(crate) fn hold(&self) -> MutexGuard<'_, StateSnapshot<T>> {
        self.inner.lock()
    }
}

impl<T: Real> Default for StateStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
