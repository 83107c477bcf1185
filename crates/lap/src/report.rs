//! HTML report rendering.

use serde_json::{Map, Value};

use crate::table::DataTable;

/// Maximum number of result rows shown in the report table.
pub const MAX_REPORT_ROWS: usize = 10;

/// Marker rendered for metadata fields that are absent.
pub const MISSING_MARKER: &str = "Unknown";

/// p-values below this are rendered in scientific notation.
const SCIENTIFIC_THRESHOLD: f64 = 0.001;

const STYLE: &str = r#"        body { font-family: Arial, sans-serif; margin: 40px; }
        h1, h2 { color: #333; }
        table { border-collapse: collapse; width: 100%; }
        th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
        th { background-color: #f2f2f2; }
        .summary { background-color: #f9f9f9; padding: 20px; margin: 20px 0; }
"#;

/// Render a results table and its metadata as a static HTML page.
///
/// The output depends only on the arguments. Metadata fields shown in the
/// summary are `analysis_type`, `n_significant_results` and
/// `analysis_status`; they are only listed when `metadata` is non-empty.
pub fn render_html(table: &DataTable, metadata: &Map<String, Value>, title: &str) -> String {
    let title = escape(title);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str(&format!("    <title>Analysis Report - {}</title>\n", title));
    html.push_str("    <style>\n");
    html.push_str(STYLE);
    html.push_str("    </style>\n</head>\n<body>\n");
    html.push_str(&format!("    <h1>Analysis Report: {}</h1>\n\n", title));

    html.push_str("    <div class=\"summary\">\n        <h2>Summary</h2>\n");
    html.push_str(&format!(
        "        <p><strong>Total Results:</strong> {}</p>\n",
        table.row_count()
    ));

    if !metadata.is_empty() {
        for (label, key) in [
            ("Analysis Type", "analysis_type"),
            ("Significant Results", "n_significant_results"),
            ("Status", "analysis_status"),
        ] {
            html.push_str(&format!(
                "        <p><strong>{}:</strong> {}</p>\n",
                label,
                escape(&metadata_field(metadata, key))
            ));
        }
    }
    html.push_str("    </div>\n\n");

    html.push_str("    <h2>Top Results</h2>\n    <table>\n");
    if table.column_count() > 0 {
        html.push_str("        <tr>");
        for col in &table.headers {
            html.push_str(&format!("<th>{}</th>", escape(col)));
        }
        html.push_str("</tr>\n");

        for row in table.head(MAX_REPORT_ROWS) {
            html.push_str("        <tr>");
            for (col, value) in table.headers.iter().zip(row) {
                html.push_str(&format!("<td>{}</td>", escape(&format_cell(col, value))));
            }
            html.push_str("</tr>\n");
        }
    }
    html.push_str("    </table>\n\n");

    html.push_str("    <h2>Analysis Details</h2>\n");
    html.push_str("    <p>This report was generated automatically by the LAP pipeline.</p>\n");
    html.push_str("    <p>For questions or issues, please contact the analysis team.</p>\n");
    html.push_str("</body>\n</html>\n");

    html
}

/// Render a cell, switching small p-values to scientific notation.
pub fn format_cell(column: &str, value: &str) -> String {
    if column.to_lowercase().ends_with("p_value") {
        if let Ok(v) = value.trim().parse::<f64>() {
            if v.is_finite() && v < SCIENTIFIC_THRESHOLD {
                return format_scientific(v);
            }
        }
    }
    value.to_string()
}

/// Scientific notation with two mantissa decimals and a signed two-digit
/// exponent, e.g. `5.00e-05`.
pub fn format_scientific(value: f64) -> String {
    let raw = format!("{:.2e}", value);
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let exp: i32 = exponent.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        None => raw,
    }
}

fn metadata_field(metadata: &Map<String, Value>, key: &str) -> String {
    match metadata.get(key) {
        None | Some(Value::Null) => MISSING_MARKER.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn results_table() -> DataTable {
        let mut table = DataTable::with_headers(["feature", "p_value", "effect_size"]);
        table.push_row(["feature_1", "0.00005", "1.5"]);
        table.push_row(["feature_2", "0.003", "-1.2"]);
        table
    }

    fn as_map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_scientific(0.00005), "5.00e-05");
        assert_eq!(format_scientific(1.234e-12), "1.23e-12");
        assert_eq!(format_scientific(0.0), "0.00e+00");
        assert_eq!(format_scientific(-0.5), "-5.00e-01");
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell("p_value", "0.00005"), "5.00e-05");
        assert_eq!(format_cell("adj_P_VALUE", "0.0001"), "1.00e-04");
        assert_eq!(format_cell("p_value", "0.003"), "0.003");
        assert_eq!(format_cell("p_value", "0.001"), "0.001");
        assert_eq!(format_cell("p_value", "NA"), "NA");
        assert_eq!(format_cell("effect_size", "0.00005"), "0.00005");
    }

    #[test]
    fn test_render_empty_table() {
        let html = render_html(&DataTable::default(), &Map::new(), "X");
        assert!(html.contains("<strong>Total Results:</strong> 0"));
        assert!(!html.contains("<tr>"));
        assert!(!html.contains("Analysis Type"));
    }

    #[test]
    fn test_render_headers_only() {
        let table = DataTable::with_headers(["feature", "p_value"]);
        let html = render_html(&table, &Map::new(), "X");
        assert!(html.contains("<th>feature</th><th>p_value</th>"));
        assert!(!html.contains("<td>"));
    }

    #[test]
    fn test_render_p_value_scientific() {
        let metadata = as_map(json!({"analysis_type": "standard"}));
        let html = render_html(&results_table(), &metadata, "Project");

        assert!(html.contains("<td>5.00e-05</td>"));
        assert!(html.contains("<td>0.003</td>"));
        assert!(html.contains("<strong>Analysis Type:</strong> standard"));
        assert!(html.contains("<strong>Status:</strong> Unknown"));
        assert!(html.contains("<title>Analysis Report - Project</title>"));
    }

    #[test]
    fn test_render_limits_rows() {
        let mut table = DataTable::with_headers(["n"]);
        for i in 0..25 {
            table.push_row([i.to_string()]);
        }
        let html = render_html(&table, &Map::new(), "X");
        assert_eq!(html.matches("<td>").count(), MAX_REPORT_ROWS);
        assert!(html.contains("<strong>Total Results:</strong> 25"));
    }

    #[test]
    fn test_render_is_deterministic_and_escaped() {
        let metadata = as_map(json!({"n_significant_results": 42}));
        let a = render_html(&results_table(), &metadata, "<A & B>");
        let b = render_html(&results_table(), &metadata, "<A & B>");
        assert_eq!(a, b);
        assert!(a.contains("Analysis Report: &lt;A &amp; B&gt;"));
        assert!(a.contains("<strong>Significant Results:</strong> 42"));
    }
}
