const KB: f64 = 1024.0;
const MB: f64 = 1024.0 * 1024.0;

/// Human readable size of the stored values, counted in characters
pub fn format_storage_usage(total_chars: usize) -> String {
    let size = total_chars as f64;
    let mb = size / MB;
    // compare the rounded figure, the way it is displayed
    if (mb * 100.0).round() / 100.0 > 1.0 {
        format!("{:.2} MB", mb)
    } else {
        format!("{:.2} KB", size / KB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_sizes_in_kb() {
        assert_eq!(format_storage_usage(0), "0.00 KB");
        assert_eq!(format_storage_usage(1536), "1.50 KB");
        assert_eq!(format_storage_usage(1024 * 1024), "1024.00 KB");
    }

    #[test]
    fn test_large_sizes_in_mb() {
        assert_eq!(format_storage_usage(3 * 1024 * 1024), "3.00 MB");
        assert_eq!(format_storage_usage(1024 * 1024 + 20 * 1024), "1.02 MB");
    }
}
