//! Plain-text period summary.

use crate::model::period::Period;
use crate::model::summary::{GroupTotal, Totals};
use crate::report::currency::format_currency;
use std::fmt::Write;

/// Renders one line per group followed by grand totals and net profit.
///
/// Output shape:
/// ```text
/// Daily Summary:
/// Date: 2024-01-01, Cost: $70.00, Income: $140.00
///
/// Total Cost: $70.00
/// Total Income: $140.00
/// Net Profit: $70.00
/// ```
pub fn render_summary_text(groups: &[GroupTotal], period: Period) -> String {
    let mut text = format!("{} Summary:\n", period.label());
    for group in groups {
        // Writing into a String cannot fail.
        let _ = writeln!(
            text,
            "Date: {}, Cost: {}, Income: {}",
            group.label,
            format_currency(group.cost),
            format_currency(group.income)
        );
    }

    let totals = Totals::of(groups);
    let _ = write!(
        text,
        "\nTotal Cost: {}\nTotal Income: {}\nNet Profit: {}",
        format_currency(totals.cost),
        format_currency(totals.income),
        format_currency(totals.net_profit())
    );
    text
}

#[cfg(test)]
mod tests {
    use super::render_summary_text;
    use crate::model::period::Period;
    use crate::model::summary::GroupTotal;

    #[test]
    fn renders_groups_then_totals() {
        let text = render_summary_text(
            &[
                GroupTotal::new("2024-01-01", 70.0, 140.0),
                GroupTotal::new("2024-01-02", 1200.0, 1000.0),
            ],
            Period::Weekly,
        );

        assert_eq!(
            text,
            "Weekly Summary:\n\
             Date: 2024-01-01, Cost: $70.00, Income: $140.00\n\
             Date: 2024-01-02, Cost: $1,200.00, Income: $1,000.00\n\
             \n\
             Total Cost: $1,270.00\n\
             Total Income: $1,140.00\n\
             Net Profit: -$130.00"
        );
    }

    #[test]
    fn empty_window_reports_zero_totals() {
        let text = render_summary_text(&[], Period::Daily);
        assert_eq!(
            text,
            "Daily Summary:\n\nTotal Cost: $0.00\nTotal Income: $0.00\nNet Profit: $0.00"
        );
    }
}
