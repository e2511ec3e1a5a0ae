//! Small display-side conversion helpers shared by backend and frontend.

/// Round a price to exactly two decimal places for display.
///
/// The displayed Open/Close/High/Low metrics are defined as 2-dp values;
/// formatting with `{:.2}` afterwards is then a no-op precision-wise.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a price with exactly two decimal places, including trailing
/// zeros (150.0 renders as "150.00").
pub fn format_price(value: f64) -> String {
    format!("{:.2}", round2(value))
}
