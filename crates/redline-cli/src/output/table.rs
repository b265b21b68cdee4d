#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN: usize = 4;

/// Render an aligned table for string rows.
///
/// Widths count characters, so excerpts with accented or wide text line up
/// as well as a terminal allows.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_width(cell))
                .max()
                .unwrap_or(0)
                .max(display_width(header))
                .max(MIN_COLUMN)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| pad(&truncate_text(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join("  ");
    let divider = "-".repeat(display_width(&header_line));

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line.trim_end().to_string());
    lines.push(divider.trim_end().to_string());
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let cell = pad(&truncate_text(value, *width), *width, looks_numeric(value));
                if options.color {
                    colorize(value, cell)
                } else {
                    cell
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Shrink the widest columns one character at a time until the row fits.
fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * 2;

    while widths.iter().sum::<usize>() + separators > max_width {
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > display_width(headers[*idx]).max(MIN_COLUMN))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);
        let Some(idx) = candidate else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn truncate_text(value: &str, width: usize) -> String {
    let single_line = value.replace(['\n', '\r', '\t'], " ");
    if display_width(&single_line) <= width {
        return single_line;
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = single_line.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit())
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(value)));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

/// Color kind and resolution cells; padding stays outside the escape codes.
fn colorize(raw: &str, cell: String) -> String {
    let code = match raw.to_ascii_lowercase().as_str() {
        "insertion" | "applied" => "32",
        "deletion" | "rejected" => "31",
        "formatting (run)" | "formatting (paragraph)" | "run_formatting"
        | "paragraph_formatting" => "33",
        _ => return cell,
    };
    let trimmed = cell.trim_end();
    let fill = &cell[trimmed.len()..];
    format!("\u{1b}[{code}m{trimmed}\u{1b}[0m{fill}")
}
