/*!
format.rs

Human-output helpers for `dbsnap` (status lines, error lines, `list --long`).

  - StyleOptions::detect() -> StyleOptions   (NO_COLOR / COLUMNS aware)
  - color(role, text, &StyleOptions) -> String
  - status_line(label, value, &StyleOptions) -> String   ("Created: x")
  - table(headers, rows, &StyleOptions) -> String
  - human_size(bytes) -> String

Helpers return strings and never print; JSON output paths do not use them.
Colour is only applied when the target stream is a terminal.
*/

use std::io::IsTerminal;

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub term_width: usize,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::detect()
    }
}

impl StyleOptions {
    /// Style for stdout.
    pub fn detect() -> Self {
        Self::detect_for(std::io::stdout().is_terminal())
    }

    /// Style for stderr (error lines).
    pub fn detect_stderr() -> Self {
        Self::detect_for(std::io::stderr().is_terminal())
    }

    fn detect_for(is_tty: bool) -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);

        StyleOptions {
            use_color: !no_color && is_tty,
            term_width: width,
        }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        StyleOptions {
            use_color: false,
            term_width: 100,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Success,
    Error,
    Dim,
    Bold,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Success => "38;5;82", // green
        Role::Error => "38;5;196",  // red
        Role::Dim => "2",
        Role::Bold => "1",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

/// `"<label>: <value>"` with the label coloured.
pub fn status_line(label: &str, value: impl AsRef<str>, style: &StyleOptions) -> String {
    format!(
        "{} {}",
        color(Role::Success, format!("{label}:"), style),
        value.as_ref()
    )
}

/// Left-aligned columns separated by two spaces; the last column is
/// truncated to fit `term_width`.
pub fn table(headers: &[&str], rows: &[Vec<String>], style: &StyleOptions) -> String {
    let cols = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let fixed: usize = widths[..cols.saturating_sub(1)]
        .iter()
        .map(|w| w + 2)
        .sum();
    if let Some(last) = widths.last_mut() {
        *last = (*last).min(style.term_width.saturating_sub(fixed).max(4));
    }

    let render = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| pad_or_truncate(c, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = vec![color(Role::Bold, render(&header_cells), style)];
    for row in rows {
        out.push(render(row));
    }
    out.join("\n")
}

fn pad_or_truncate(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len <= width {
        return format!("{s}{}", " ".repeat(width - len));
    }
    let mut cut: String = s.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Bytes as `B`, `KiB`, `MiB` or `GiB` with one decimal above bytes.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KiB", "MiB", "GiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
