use owo_colors::OwoColorize as _;

/// Render a simple ASCII table.
/// Column widths are derived from headers and the character count of each cell.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
  let cols = headers.len();
  let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
  for row in rows {
    for (i, cell) in row.iter().enumerate().take(cols) {
      widths[i] = widths[i].max(cell.chars().count());
    }
  }

  let mut out = String::new();
  let mut header_line = String::new();
  for (i, text) in headers.iter().enumerate() {
    pad_cell(&mut header_line, text, widths[i], i + 1 < cols);
  }
  out.push_str(&header_line.dimmed().to_string());
  out.push('\n');

  for row in rows {
    for (i, cell) in row.iter().enumerate().take(cols) {
      pad_cell(&mut out, cell, widths[i], i + 1 < cols);
    }
    out.push('\n');
  }
  out
}

fn pad_cell(line: &mut String, cell: &str, width: usize, more: bool) {
  line.push_str(cell);
  if more {
    let spaces = width.saturating_sub(cell.chars().count()) + 1;
    line.push_str(&" ".repeat(spaces));
  }
}

/// Print a table to stdout.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
  anstream::print!("{}", render_table(headers, rows));
}

/// Placeholder for a field the engine did not send.
pub fn or_dash(value: Option<impl ToString>) -> String {
  value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
