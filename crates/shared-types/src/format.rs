//! Human-readable byte sizes for device listings.

const UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];
const K: f64 = 1024.0;

/// Format a byte count with binary (1024) steps, e.g. `1073741824` → `"1 GB"`.
///
/// The value is rounded to `decimals` places and trailing zeros are dropped,
/// so `1536` → `"1.5 KB"`.
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0usize;
    let mut scaled = bytes as f64;
    while scaled >= K && exponent < UNITS.len() - 1 {
        scaled /= K;
        exponent += 1;
    }

    let rounded = format!("{:.*}", decimals, scaled);
    let trimmed = if rounded.contains('.') {
        rounded.trim_end_matches('0').trim_end_matches('.')
    } else {
        rounded.as_str()
    };

    format!("{} {}", trimmed, UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_gigabyte() {
        assert_eq!(format_bytes(1_073_741_824, 2), "1 GB");
    }

    #[test]
    fn test_zero_bytes() {
        assert_eq!(format_bytes(0, 2), "0 Bytes");
    }

    #[test]
    fn test_below_one_kilobyte() {
        assert_eq!(format_bytes(512, 2), "512 Bytes");
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(format_bytes(1536, 2), "1.5 KB");
        assert_eq!(format_bytes(1_288_490_189, 2), "1.2 GB");
    }

    #[test]
    fn test_zero_decimals() {
        assert_eq!(format_bytes(1536, 0), "2 KB");
    }

    #[test]
    fn test_largest_unit_for_u64() {
        assert!(format_bytes(u64::MAX, 2).ends_with("EB"));
    }

    proptest::proptest! {
        #[test]
        fn prop_scaled_value_stays_below_next_unit(bytes in 1u64.., decimals in 0usize..4) {
            let rendered = format_bytes(bytes, decimals);
            let (number, unit) = rendered.split_once(' ').expect("value and unit");
            let number: f64 = number.parse().expect("numeric prefix");
            proptest::prop_assert!(UNITS.contains(&unit));
            proptest::prop_assert!(number <= K);
        }
    }
}
