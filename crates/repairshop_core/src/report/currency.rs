//! Currency formatting for report output.

/// Formats an amount as dollars with thousands separators and two decimals.
///
/// Rounds to the nearest cent; amounts that round to zero never carry a
/// minus sign.
///
/// ```
/// use repairshop_core::report::currency::format_currency;
/// assert_eq!(format_currency(1234.5), "$1,234.50");
/// assert_eq!(format_currency(-5.0), "-$5.00");
/// ```
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (dollars, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed.bytes().any(|byte| matches!(byte, b'1'..=b'9')) {
        "-"
    } else {
        ""
    };

    format!("{sign}${}.{cents}", group_thousands(dollars))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
