// Utility functions

/// Rounds to a whole number and inserts `,` as the thousands separator.
pub fn group_thousands(amount: f64) -> String {
    let rounded = format!("{:.0}", amount.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, c) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0.0 && rounded != "0" {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Formats a percentage with an explicit sign, e.g. `+3.2%`.
pub fn signed_pct(pct: f64) -> String {
    format!("{:+.1}%", pct)
}
