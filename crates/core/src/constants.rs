/// Storage key of the favorites slot
pub const FAVORITES_STORAGE_KEY: &str = "favorites";

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Placeholder shown for a change figure the source did not report
pub const NOT_AVAILABLE: &str = "N/A";
