//! HTML heatmap report
//!
//! Renders a frequency matrix as a standalone HTML page:
//! - a table with one colored cell per bigram, raw count in a hover tooltip
//! - a caption describing the cutoff policy
//! - a scale bar mapping bucket ranges to colors
//!
//! Rendering is pure; writing the page is left to the caller.

use crate::bucket::{BucketRange, Bucketizer};
use crate::matrix::FrequencyMatrix;
use std::fmt::Write as _;

/// Default report heading
pub const DEFAULT_TITLE: &str = "Bi-gram frequencies in the OpenITI corpus";

/// Data shown in the scale bar and caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    /// Range of bucket 0
    pub zero: BucketRange,
    /// Ranges of buckets 1..N
    pub ranges: Vec<BucketRange>,
    pub cutoff: Option<u64>,
    pub min_count: u64,
    pub max_count: u64,
}

impl Legend {
    pub fn new(bucketizer: &Bucketizer, min_count: u64) -> Self {
        // Starts at the smallest observed count; empty when that is already
        // above bucket 0
        let mut zero = bucketizer.zero_range();
        zero.min = min_count;

        Self {
            zero,
            ranges: bucketizer.boundaries(),
            cutoff: bucketizer.cutoff(),
            min_count,
            max_count: bucketizer.max_count(),
        }
    }

    pub fn num_buckets(&self) -> usize {
        self.ranges.len() + 1
    }

    /// Sentence describing how counts were bucketed
    pub fn caption(&self) -> String {
        match self.cutoff {
            Some(cutoff) => format!(
                "corrected logarithmic scale (minimum cutoff point: {})",
                group_thousands(cutoff)
            ),
            None => "corrected logarithmic scale (no minimum cutoff)".to_string(),
        }
    }
}

/// Render the complete report page
///
/// `bucket_of` maps a count to its bucket; `color_of` maps a bucket to a CSS
/// color. Both are called for every bucket in `0..legend.num_buckets()`.
pub fn render_report<B, C>(
    matrix: &FrequencyMatrix,
    bucket_of: B,
    color_of: C,
    legend: &Legend,
    title: &str,
) -> String
where
    B: Fn(u64) -> usize,
    C: Fn(usize) -> String,
{
    let mut html = String::new();

    html.push_str(&render_head(title, legend.num_buckets(), &color_of));
    html.push_str("<body>\n");
    let _ = writeln!(html, "<h1>{}</h1>", html_escape(title));
    html.push_str(&render_table(matrix, &bucket_of));
    let _ = writeln!(html, "<p class=\"caption\">{}</p>", html_escape(&legend.caption()));
    html.push_str(&render_scale_bar(legend));
    html.push_str("</body>\n</html>\n");

    html
}

fn render_head<C>(title: &str, num_buckets: usize, color_of: &C) -> String
where
    C: Fn(usize) -> String,
{
    let mut style = String::from(CSS);
    for bucket in 0..num_buckets {
        let _ = write!(
            style,
            "\n.b{} {{\n  background-color: {};\n}}\n",
            bucket,
            html_escape(&color_of(bucket))
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<title>{}</title>
<style>
{}</style>
</head>
"#,
        html_escape(title),
        style
    )
}

fn render_table<B>(matrix: &FrequencyMatrix, bucket_of: &B) -> String
where
    B: Fn(u64) -> usize,
{
    let mut table = String::from("<table class=\"heatmap\">\n  <tr>\n    <th></th>\n");
    for symbol in matrix.symbols() {
        let _ = writeln!(table, "    <th>{}</th>", html_escape(&symbol.to_string()));
    }
    table.push_str("  </tr>\n");

    for (symbol, row) in matrix.symbols().iter().zip(matrix.rows()) {
        let _ = write!(
            table,
            "  <tr>\n    <th>{}</th>\n",
            html_escape(&symbol.to_string())
        );
        for cell in row {
            let _ = write!(
                table,
                "    <td class=\"b{}\">{}\n      <span class=\"tooltip\">{}</span>\n    </td>\n",
                bucket_of(cell.count),
                html_escape(&cell.bigram),
                group_thousands(cell.count)
            );
        }
        table.push_str("  </tr>\n");
    }

    table.push_str("</table>\n");
    table
}

fn render_scale_bar(legend: &Legend) -> String {
    let mut bar = String::from("<table class=\"scale\">\n  <tr>\n");
    let _ = writeln!(bar, "    <td class=\"b0\">{}</td>", range_label(&legend.zero));

    for range in &legend.ranges {
        let _ = writeln!(
            bar,
            "    <td class=\"b{}\"><span class=\"tooltip\">{}</span></td>",
            range.bucket,
            range_label(range)
        );
    }

    let _ = writeln!(
        bar,
        "    <td class=\"b{}\">{}</td>",
        legend.num_buckets() - 1,
        group_thousands(legend.max_count)
    );
    bar.push_str("  </tr>\n</table>\n");
    bar
}

fn range_label(range: &BucketRange) -> String {
    if range.is_empty() {
        "empty".to_string()
    } else {
        format!("{}-{}", group_thousands(range.min), group_thousands(range.max))
    }
}

/// Format a count with comma thousands separators
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const CSS: &str = r#"table {
  border-collapse: collapse;
}

td {
  width: 20px;
  height: 20px;
}

td .tooltip {
  visibility: hidden;
  width: 120px;
  background-color: black;
  color: #fff;
  text-align: center;
  padding: 5px 0;
  border-radius: 6px;
  position: absolute;
  z-index: 1;
}

td:hover .tooltip {
  visibility: visible;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::matrix::build_matrix;
    use crate::table::CountTable;

    fn sample_report(cutoff: Option<u64>) -> String {
        let mut table = CountTable::new(Alphabet::new("ab").unwrap());
        table.accumulate_text(&"ab".repeat(1500));

        let matrix = build_matrix(&table, table.alphabet()).unwrap();
        let bucketizer = Bucketizer::new(4, cutoff, table.max_count()).unwrap();
        let legend = Legend::new(&bucketizer, table.min_count());
        let colors = ["#ffffff", "#111111", "#222222", "#333333"];

        render_report(
            &matrix,
            |count| bucketizer.classify(count),
            |bucket| colors[bucket].to_string(),
            &legend,
            "Test <report>",
        )
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_report_structure() {
        let html = sample_report(Some(1000));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Test &lt;report&gt;</h1>"));
        assert!(html.contains("<meta charset=\"UTF-8\">"));
        for bucket in 0..4 {
            assert!(html.contains(&format!(".b{} {{", bucket)));
        }
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_report_cells_and_tooltips() {
        let html = sample_report(Some(1000));

        // "ab" occurs 1500 times: the maximum, so the top bucket
        assert!(html.contains("<td class=\"b3\">ab\n      <span class=\"tooltip\">1,500</span>"));
        // "ba" occurs 1499 times, "aa" never
        assert!(html.contains("<span class=\"tooltip\">1,499</span>"));
        assert!(html.contains("<td class=\"b0\">aa\n      <span class=\"tooltip\">0</span>"));
    }

    #[test]
    fn test_report_caption() {
        assert!(sample_report(Some(1000)).contains("minimum cutoff point: 1,000"));
        assert!(sample_report(None).contains("no minimum cutoff"));
    }

    #[test]
    fn test_scale_bar() {
        let html = sample_report(Some(1000));
        assert!(html.contains("<td class=\"b0\">0-999</td>"));
        assert!(html.contains("<td class=\"b3\">1,500</td>"));
    }

    #[test]
    fn test_legend_ranges() {
        let bucketizer = Bucketizer::new(10, Some(1000), 50_000).unwrap();
        let legend = Legend::new(&bucketizer, 3);

        assert_eq!(legend.num_buckets(), 10);
        assert_eq!(legend.ranges.len(), 9);
        assert_eq!(legend.zero.min, 3);
        assert_eq!(legend.zero.max, 999);
        assert_eq!(legend.max_count, 50_000);
    }

    #[test]
    fn test_zero_bucket_empty_when_all_counts_above_cutoff() {
        let bucketizer = Bucketizer::new(10, Some(1000), 50_000).unwrap();
        let legend = Legend::new(&bucketizer, 2500);

        assert!(legend.zero.is_empty());
        assert_eq!(range_label(&legend.zero), "empty");

        let matrix = {
            let mut table = CountTable::new(Alphabet::new("a").unwrap());
            table.accumulate_text("aa");
            build_matrix(&table, table.alphabet()).unwrap()
        };
        let html = render_report(
            &matrix,
            |count| bucketizer.classify(count),
            |_| "#000000".to_string(),
            &legend,
            "t",
        );
        assert!(html.contains("<td class=\"b0\">empty</td>"));
        assert!(!html.contains("999-999"));
    }
}
