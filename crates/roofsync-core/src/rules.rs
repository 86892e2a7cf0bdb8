//! Project rules for commercial roof surveys.
//!
//! Every stored property satisfies the roof-size bound, and its capacity
//! figures are derived once, at creation, from the constants below. The
//! derived values are snapshots: changing a constant later never rewrites a
//! record that already exists.
//!
//! ```
//! use roofsync_core::rules::{derive, is_valid_roof_size};
//!
//! assert!(is_valid_roof_size(50_000.0));
//! let metrics = derive(50_000.0);
//! assert_eq!(metrics.usable_area, 40_000.0);
//! assert_eq!(metrics.capacity_kw, 800.0);
//! ```

use serde::{Deserialize, Serialize};

/// Smallest roof (sq ft) accepted for a commercial survey.
pub const MIN_ROOF_SIZE: f64 = 1_000.0;

/// Largest roof (sq ft) accepted for a commercial survey.
pub const MAX_ROOF_SIZE: f64 = 1_000_000.0;

/// Fraction of the total roof assumed available for panels.
pub const USABLE_AREA_PERCENTAGE: f64 = 0.80;

/// Installed capacity per usable square foot, in watts.
pub const POWER_DENSITY_W_PER_SQFT: f64 = 20.0;

/// Capacity figures derived from a roof area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Usable roof area in sq ft.
    pub usable_area: f64,
    /// Installable capacity in watts.
    pub capacity_watts: f64,
    /// Installable capacity in kilowatts.
    pub capacity_kw: f64,
    /// Installable capacity in megawatts.
    pub capacity_mw: f64,
}

/// Returns `true` iff `roof_area` lies within `[MIN_ROOF_SIZE, MAX_ROOF_SIZE]`.
///
/// NaN and infinities are never valid.
pub fn is_valid_roof_size(roof_area: f64) -> bool {
    (MIN_ROOF_SIZE..=MAX_ROOF_SIZE).contains(&roof_area)
}

/// Usable area for a total roof area.
pub fn usable_area(total_area: f64) -> f64 {
    total_area * USABLE_AREA_PERCENTAGE
}

/// Installable capacity in watts for a usable area.
pub fn capacity_watts(usable_area: f64) -> f64 {
    usable_area * POWER_DENSITY_W_PER_SQFT
}

/// Watts to kilowatts.
pub fn to_kw(watts: f64) -> f64 {
    watts / 1_000.0
}

/// Watts to megawatts.
pub fn to_mw(watts: f64) -> f64 {
    watts / 1_000_000.0
}

/// Derive every capacity figure from a roof area.
///
/// Pure and infallible; callers validate the area with
/// [`is_valid_roof_size`] first.
pub fn derive(roof_area: f64) -> DerivedMetrics {
    let usable_area = usable_area(roof_area);
    let capacity_watts = capacity_watts(usable_area);
    DerivedMetrics {
        usable_area,
        capacity_watts,
        capacity_kw: to_kw(capacity_watts),
        capacity_mw: to_mw(capacity_watts),
    }
}

/// Message shown when a roof area is out of bounds.
pub fn roof_size_message() -> String {
    format!(
        "Roof size must be between {} and {} sq ft.",
        group_thousands(MIN_ROOF_SIZE),
        group_thousands(MAX_ROOF_SIZE)
    )
}

/// Format a whole number of square feet with `,` thousands separators.
pub fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}
