//! Plain-text preview of collected rows.

use waitwatch_types::{widths, Dataset, HEADERS};

/// Default number of rows shown after a run.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Render the first `limit` rows as a right-aligned text table.
///
/// Returns `None` when there is nothing to show.
///
/// ```rust
/// use waitwatch::preview::render;
/// use waitwatch_types::{Dataset, Row};
///
/// let mut dataset = Dataset::new();
/// dataset.append(vec![Row::new("2024-01-01 10:00:00", "General Hospital", "2 hr 12 min")]);
///
/// let table = render(&dataset, 10).unwrap();
/// assert_eq!(
///     table,
///     "          Timestamp    Hospital Name   Wait Time\n\
///      2024-01-01 10:00:00 General Hospital 2 hr 12 min\n"
/// );
/// ```
pub fn render(dataset: &Dataset, limit: usize) -> Option<String> {
    let rows = dataset.head(limit);
    if rows.is_empty() {
        return None;
    }

    let widths = widths(HEADERS, rows.iter());
    let mut out = String::new();
    push_line(&mut out, HEADERS, widths);
    for row in rows {
        push_line(&mut out, row.fields(), widths);
    }
    Some(out)
}

fn push_line(out: &mut String, fields: [&str; 3], widths: [usize; 3]) {
    let cells: Vec<String> = fields
        .iter()
        .zip(widths)
        .map(|(field, width)| format!("{:>width$}", field, width = width))
        .collect();
    out.push_str(&cells.join(" "));
    out.push('\n');
}
