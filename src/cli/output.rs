//! Terminal formatting shared by the CLI commands.
//!
//! Coloring goes through `colored`, which honors NO_COLOR.

use crate::core::types::DocumentMeta;
use std::collections::BTreeSet;

/// Color scheme for CLI output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Style for labels/headers
    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Style for document IDs
    pub fn document_id(s: &str) -> ColoredString {
        s.cyan()
    }

    /// Style for file paths and asset names
    pub fn file_path(s: &str) -> ColoredString {
        s.blue()
    }

    /// Style for numbers/counts
    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }

    /// Style for dim/secondary text
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    /// Style for category and tag names
    pub fn facet(s: &str) -> ColoredString {
        s.magenta()
    }
}

/// Human-readable byte count (binary units, one decimal place)
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [(&str, u64); 3] = [("GB", 1 << 30), ("MB", 1 << 20), ("KB", 1 << 10)];

    for (unit, scale) in UNITS {
        if bytes >= scale {
            return format!("{:.1} {unit}", bytes as f64 / scale as f64);
        }
    }
    format!("{bytes} B")
}

/// Format a millisecond duration as the largest whole unit
pub fn format_millis(ms: u64) -> String {
    const SEC: u64 = 1000;
    const MIN: u64 = 60 * SEC;
    const HOUR: u64 = 60 * MIN;

    if ms >= HOUR && ms % HOUR == 0 {
        format!("{}h", ms / HOUR)
    } else if ms >= MIN && ms % MIN == 0 {
        format!("{}m", ms / MIN)
    } else if ms >= SEC && ms % SEC == 0 {
        format!("{}s", ms / SEC)
    } else {
        format!("{ms}ms")
    }
}

/// Age of a timestamp as its largest whole unit ("3d ago", "just now")
pub fn format_relative_time(timestamp: &chrono::DateTime<chrono::Utc>) -> String {
    let age = chrono::Utc::now().signed_duration_since(*timestamp);
    if age.num_seconds() < 0 {
        return "in the future".to_string();
    }

    match (age.num_days(), age.num_hours(), age.num_minutes()) {
        (d, _, _) if d > 0 => format!("{d}d ago"),
        (_, h, _) if h > 0 => format!("{h}h ago"),
        (_, _, m) if m > 0 => format!("{m}m ago"),
        _ => "just now".to_string(),
    }
}

/// Comma-separated facet list, or a dim dash when empty
pub fn format_facets(values: &BTreeSet<String>) -> String {
    if values.is_empty() {
        return colors::dim("-").to_string();
    }

    values
        .iter()
        .map(|v| colors::facet(v).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-line summary of a document for listings
pub fn format_document_line(meta: &DocumentMeta) -> String {
    let status = if meta.published {
        colors::success("published")
    } else {
        colors::dim("draft")
    };

    format!(
        "  {:<24} {:<40} {:<9}  {}",
        colors::document_id(&meta.id),
        meta.title,
        status,
        colors::dim(&format_relative_time(&meta.created_at))
    )
}

pub fn print_error(message: &str) {
    eprintln!("{}: {}", colors::error("Error"), message);
}
