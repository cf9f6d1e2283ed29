use serde_json::Number;

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Canonical text for a JSON number: whole values print without a fraction,
/// so `1`, `1.0` and `1e0` all read `1`.
pub(crate) fn canonical(number: &Number) -> String {
    if number.is_i64() || number.is_u64() {
        return number.to_string();
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER => {
            format!("{}", value as i64)
        }
        _ => number.to_string(),
    }
}
