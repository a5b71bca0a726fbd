//! # Unit Types
//!
//! Type-safe wrappers for the moment units that cross the engine boundary.
//! Everything inside the engines works in N and mm (stresses in MPa = N/mm²);
//! inputs and results report moments in kN·m.
//!
//! ## Example
//!
//! ```rust
//! use flexure_core::units::{KilonewtonMeters, NewtonMillimeters};
//!
//! let mn = NewtonMillimeters(253_480_000.0);
//! let mn_knm: KilonewtonMeters = mn.into();
//! assert!((mn_knm.0 - 253.48).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// N·mm per kN·m
pub const NMM_PER_KNM: f64 = 1.0e6;

/// Moment in newton-millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

/// Moment in kilonewton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonMeters(pub f64);

impl From<NewtonMillimeters> for KilonewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        KilonewtonMeters(nmm.0 / NMM_PER_KNM)
    }
}

impl From<KilonewtonMeters> for NewtonMillimeters {
    fn from(knm: KilonewtonMeters) -> Self {
        NewtonMillimeters(knm.0 * NMM_PER_KNM)
    }
}

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(NewtonMillimeters);
impl_arithmetic!(KilonewtonMeters);

/// Convert a raw N·mm moment to kN·m.
#[inline]
pub fn nmm_to_knm(moment_nmm: f64) -> f64 {
    KilonewtonMeters::from(NewtonMillimeters(moment_nmm)).value()
}

/// Convert a raw kN·m moment to N·mm.
#[inline]
pub fn knm_to_nmm(moment_knm: f64) -> f64 {
    NewtonMillimeters::from(KilonewtonMeters(moment_knm)).value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knm_to_nmm() {
        let m = KilonewtonMeters(120.0);
        let nmm: NewtonMillimeters = m.into();
        assert_eq!(nmm.0, 120.0e6);
        assert_eq!(knm_to_nmm(1.5), 1.5e6);
    }

    #[test]
    fn test_nmm_to_knm() {
        assert!((nmm_to_knm(482_600_000.0) - 482.6).abs() < 1e-9);
    }

    #[test]
    fn test_arithmetic() {
        let a = KilonewtonMeters(400.0);
        let b = KilonewtonMeters(392.5);
        assert!(((a - b).0 - 7.5).abs() < 1e-12);
        assert_eq!((a + b).0, 792.5);
        assert_eq!((a * 0.9).0, 360.0);
    }

    #[test]
    fn test_serialization() {
        let m = KilonewtonMeters(231.5);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "231.5");

        let roundtrip: KilonewtonMeters = serde_json::from_str(&json).unwrap();
        assert_eq!(m, roundtrip);
    }
}
