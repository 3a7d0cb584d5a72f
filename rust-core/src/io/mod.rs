//! Text encodings exchanged with the rest of the toolkit
//!
//! BBP time series files and FAS/EAS column files.

pub mod bbp;
pub mod fas_file;

pub use bbp::{load_bbp, read_bbp, save_bbp, write_bbp, BbpWriteOptions};
pub use fas_file::{load_fas_columns, read_fas_columns, save_smoothed_eas, write_smoothed_eas};

/// Format like C's `%.{precision}E`: signed exponent of at least two digits
pub fn format_scientific(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            String::from("NAN")
        } else if value > 0.0 {
            String::from("INF")
        } else {
            String::from("-INF")
        };
    }

    let formatted = format!("{:.*E}", precision, value);
    match formatted.split_once('E') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}E{}{:02}", mantissa, sign, exponent.abs())
        }
        None => formatted,
    }
}
