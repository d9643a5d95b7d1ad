use std::cmp::Ordering;

pub fn finite_or_zero(value: f64) -> f64 {
	if value.is_finite() { value } else { 0.0 }
}

/// Rounds half-up to one decimal place (`-0.25` becomes `-0.2`).
pub fn round_to_tenth(value: f64) -> f64 {
	(value * 10.0 + 0.5).floor() / 10.0
}

pub fn cmp_f64_desc(left: f64, right: f64) -> Ordering {
	right.partial_cmp(&left).unwrap_or(Ordering::Equal)
}
