//! Display formatting for constants and file sizes.

use spectrum_analyzer::{ColorTriple, KernelSize};

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a color bound as `[h, s, v]`.
pub fn format_triple(triple: &ColorTriple) -> String {
    format!("[{}, {}, {}]", triple[0], triple[1], triple[2])
}

/// Format a kernel shape as `rows × cols`.
pub fn format_kernel(kernel: &KernelSize) -> String {
    format!("{} × {}", kernel.rows, kernel.cols)
}

/// Human-readable file size: whole bytes below 1 KB, one decimal above.
///
/// # Examples
/// ```ignore
/// assert_eq!(format_file_size(512), "512 B");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_triple() {
        assert_eq!(format_triple(&[33, 45, 45]), "[33, 45, 45]");
    }

    #[test]
    fn test_format_kernel() {
        assert_eq!(format_kernel(&KernelSize { rows: 5, cols: 5 }), "5 × 5");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.0 GB");
        assert_eq!(format_file_size(2048 * 1024 * 1024 * 1024), "2048.0 GB");
    }
}
