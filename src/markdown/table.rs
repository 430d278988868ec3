//! Pipe-table layout.
//!
//! Takes rows of already-rendered cell text (newlines stripped by the
//! caller — pipe-table syntax is one line per row) and lays them out with
//! per-column display widths. Widths count wide glyphs (CJK etc.) as two
//! columns so tables stay aligned in a terminal.
//!
//! Row 0 always occupies the header slot: the emitted header line is blank,
//! followed by the dash separator, then every input row as a data row.
//! Nothing in the source format distinguishes a genuinely headerless table,
//! so no heuristic is attempted.

use unicode_width::UnicodeWidthStr;

use super::escape::escape;

/// Render rows of cell text as a Markdown pipe table.
///
/// Rows may be ragged; short rows are padded with empty cells to the
/// longest row. Pipe characters inside cells are escaped so column
/// boundaries stay unambiguous. Zero rows produce no output.
///
/// # Examples
///
/// ```
/// use docmark::markdown::render_table;
///
/// let rows = vec![
///     vec!["a".to_string(), "bb".to_string()],
///     vec!["c".to_string(), "d".to_string()],
/// ];
/// assert_eq!(render_table(&rows), "| |  |\n|-|--|\n|a|bb|\n|c|d |\n");
/// ```
pub fn render_table(rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let maxcol = rows.iter().map(|row| row.len()).max().unwrap_or(0);

    let mut widths = vec![0usize; maxcol];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let width = cell.width();
            if widths[i] < width {
                widths[i] = width;
            }
        }
    }

    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        if i == 0 {
            for &width in &widths {
                out.push('|');
                pad(&mut out, ' ', width);
            }
            out.push_str("|\n");
            for &width in &widths {
                out.push('|');
                pad(&mut out, '-', width);
            }
            out.push_str("|\n");
        }
        for (j, &width) in widths.iter().enumerate() {
            out.push('|');
            match row.get(j) {
                Some(cell) => {
                    out.push_str(&escape(cell, "|"));
                    pad(&mut out, ' ', width - cell.width());
                }
                None => pad(&mut out, ' ', width),
            }
        }
        out.push_str("|\n");
    }

    out
}

fn pad(out: &mut String, c: char, count: usize) {
    for _ in 0..count {
        out.push(c);
    }
}
