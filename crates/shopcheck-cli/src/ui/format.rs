//! Formatting for durations and the link check summary.

use super::colors_enabled;
use owo_colors::OwoColorize;
use shopcheck_pages::LinkReport;
use std::time::Duration;

/// Formats a duration as `50ms`, `1.50s` or `2m 30s`.
///
/// ```
/// use std::time::Duration;
/// use shopcheck_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(150)), "2m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{total_ms}ms")
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Prints the outcome of a link check to stderr.
pub fn print_link_summary(report: &LinkReport, elapsed: Duration) {
    let color = colors_enabled();
    let heading = "Summary:";
    eprintln!();
    eprintln!(
        "{} {} links checked in {}",
        if color { heading.bold().to_string() } else { heading.to_string() },
        report.checked,
        format_duration(elapsed)
    );

    if report.is_healthy() {
        let line = "all links healthy";
        eprintln!("  {}", if color { line.green().to_string() } else { line.to_string() });
        return;
    }

    let line = format!("{} broken", report.failures.len());
    eprintln!("  {}", if color { line.red().bold().to_string() } else { line });
    for failure in &report.failures {
        eprintln!("  - {failure}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopcheck_pages::LinkFailure;

    #[test]
    fn test_format_duration_boundaries() {
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
        assert_eq!(format_duration(Duration::from_millis(1000)), "1.00s");
        assert_eq!(format_duration(Duration::from_secs(60)), "1m 0s");
    }

    #[test]
    fn test_print_link_summary() {
        let report = LinkReport {
            checked: 2,
            failures: vec![LinkFailure::EmptyHref {
                text: "Outlet".to_string(),
            }],
        };
        print_link_summary(&report, Duration::from_millis(1200));
        print_link_summary(&LinkReport::default(), Duration::ZERO);
    }
}
