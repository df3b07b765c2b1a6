//! Density lookup used for the illustrative link weight.

/// Density applied to links whose material is steel.
pub const STEEL_DENSITY: f64 = 7850.0;

/// Density applied to every other material.
pub const DEFAULT_DENSITY: f64 = 2700.0;

/// Return the density constant for a free-text material name.
///
/// Only `steel` (in any letter case) is recognised.
///
/// # Examples
/// ```
/// use trussview::{density, DEFAULT_DENSITY, STEEL_DENSITY};
///
/// assert_eq!(density("Steel"), STEEL_DENSITY);
/// assert_eq!(density("aluminium"), DEFAULT_DENSITY);
/// ```
#[must_use]
pub fn density(material: &str) -> f64 {
    if material.to_lowercase() == "steel" {
        STEEL_DENSITY
    } else {
        DEFAULT_DENSITY
    }
}
