//! Human-facing result rendering

use wirepress_core::{format_bytes, format_duration, BenchmarkResult};

/// Render results as a fixed-width table
///
/// Rows appear in measurement order. An empty slice renders a one-line notice
/// instead of a bare header.
pub fn render_table(results: &[BenchmarkResult]) -> String {
    if results.is_empty() {
        return "No benchmark results (all codec runs failed).\n".to_string();
    }

    let mut out = String::new();

    out.push_str(&format!(
        "{:<10} {:>12} {:>12} {:>9} {:>12} {:>12}\n",
        "Algorithm", "Original", "Compressed", "Ratio", "Time", "Savings"
    ));
    out.push_str(&format!("{}\n", "-".repeat(72)));

    for result in results {
        out.push_str(&format!(
            "{:<10} {:>12} {:>12} {:>8.2}% {:>12} {:>12}\n",
            result.algorithm,
            format_bytes(result.original_size as u64),
            format_bytes(result.compressed_size as u64),
            result.ratio,
            format_duration(result.elapsed),
            format_savings(result.savings),
        ));
    }

    out
}

fn format_savings(savings: i64) -> String {
    if savings < 0 {
        format!("-{}", format_bytes(savings.unsigned_abs()))
    } else {
        format_bytes(savings as u64)
    }
}
