//! Number formatting for CSV cells, console lines and plot titles
//!
//! Output follows the conventions of the usual Python data stack: shortest
//! round-trip floats, two-digit exponents and lowercase `nan`/`inf`.

/// Shortest round-trip representation, e.g. `0.1`, `100.0`, `1e-05`
pub fn python_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    pad_exponent(&format!("{:?}", value))
}

/// CSV cell text; missing values become an empty cell
pub fn format_float(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => python_repr(v),
        _ => String::new(),
    }
}

/// Scientific notation with a fixed number of decimals, e.g. `1.23e-05`
pub fn format_sci(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return python_repr(value);
    }
    pad_exponent(&format!("{:.*e}", precision, value))
}

/// Fixed-point notation with a fixed number of decimals
pub fn format_fixed(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return python_repr(value);
    }
    format!("{:.*}", precision, value)
}

/// Rewrite `1e-5` as `1e-05` and `1e20` as `1e+20`
fn pad_exponent(text: &str) -> String {
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text.to_string();
    };
    match exponent.parse::<i32>() {
        Ok(exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        Err(_) => text.to_string(),
    }
}
