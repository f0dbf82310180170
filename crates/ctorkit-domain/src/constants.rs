//! Domain layer constants
//!
//! Defaults applied when a parameter declares no bound descriptor.

// ============================================================================
// COUNT PARAMETER CONSTANTS
// ============================================================================

/// Default increment between selectable count values
pub const COUNT_DEFAULT_STEP: i64 = 1;

/// Lower bound of a count parameter without a bound descriptor
pub const COUNT_DEFAULT_MIN: i64 = i64::MIN;

/// Upper bound of a count parameter without a bound descriptor
pub const COUNT_DEFAULT_MAX: i64 = i64::MAX;

// ============================================================================
// QUANTITY PARAMETER CONSTANTS
// ============================================================================

/// Default number of decimal places for a quantity parameter
pub const QUANTITY_DEFAULT_PRECISION: u32 = 3;

/// Lower bound of a quantity parameter without a bound descriptor
pub const QUANTITY_DEFAULT_MIN: f64 = f64::MIN;

/// Upper bound of a quantity parameter without a bound descriptor
pub const QUANTITY_DEFAULT_MAX: f64 = f64::MAX;

// ============================================================================
// LABEL PARAMETER CONSTANTS
// ============================================================================

/// Minimum character length of a label parameter without a descriptor
pub const LABEL_DEFAULT_MIN_LENGTH: u32 = 0;

/// Maximum character length of a label parameter without a descriptor
pub const LABEL_DEFAULT_MAX_LENGTH: u32 = u32::MAX;
