//! Console rendering of the summary statistics.

use crate::analysis::Summary;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;

pub fn overall_line(summary: &Summary) -> String {
    format!("Overall Default Rate: {:.2}%", summary.overall_default_rate)
}

/// A titled two-column table, one `label  value` row per key.
/// Labels are left-aligned to the widest key.
pub fn grouped_table<K: Display>(title: &str, rows: &BTreeMap<K, f64>) -> String {
    let labels: Vec<String> = rows.keys().map(|k| k.to_string()).collect();
    let width = labels.iter().map(String::len).max().unwrap_or(0);

    let mut out = format!("{title}:\n");
    for (label, value) in labels.iter().zip(rows.values()) {
        out.push_str(&format!("{label:<width$}  {value:>12.2}\n"));
    }
    out
}

/// The full console report, sections separated by blank lines.
pub fn render(summary: &Summary) -> String {
    format!(
        "{}\n\n{}\n{}",
        overall_line(summary),
        grouped_table("Average Loan Amount by Type", &summary.average_amount_by_type),
        grouped_table("Default Rate by Gender (%)", &summary.default_rate_by_gender),
    )
}

pub fn export_notice(path: &Path) -> String {
    format!(
        "Processed borrower demographics exported to '{}'.",
        path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Gender, LoanType};

    fn fixture() -> Summary {
        Summary {
            overall_default_rate: 20.4,
            average_amount_by_type: BTreeMap::from([
                (LoanType::Auto, 250_000.5),
                (LoanType::Home, 1_000.0),
            ]),
            default_rate_by_gender: BTreeMap::from([(Gender::Female, 18.0), (Gender::Male, 22.75)]),
        }
    }

    #[test]
    fn overall_line_has_two_decimals() {
        assert_eq!(overall_line(&fixture()), "Overall Default Rate: 20.40%");
    }

    #[test]
    fn tables_list_keys_in_order() {
        let text = render(&fixture());
        let auto = text.find("Auto").unwrap();
        let home = text.find("Home").unwrap();
        assert!(auto < home);
        assert!(text.contains("Average Loan Amount by Type:\n"));
        assert!(text.contains("Default Rate by Gender (%):\n"));
        assert!(text.contains("250000.50"));
        assert!(text.contains("22.75"));
    }
}
