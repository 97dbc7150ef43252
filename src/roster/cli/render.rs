//! # Rendering
//!
//! Turns command results into terminal text. Layout math (column widths,
//! truncation, padding) is done on plain strings with `unicode-width`; styles
//! are applied afterwards so escape codes never skew alignment.
//!
//! Every `render_*` function takes `use_color` and returns a `String`, which
//! keeps them testable. The `print_*` wrappers decide colour from the terminal.

use super::styles::TABLE_STYLES;
use colored::Colorize;
use console::Style;
use roster::api::{CmdMessage, MessageLevel};
use roster::model::Record;
use roster::validation::ValidationErrors;
use roster::view::{Page, SortDirection, SortDirective, SortKey};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const ID_WIDTH: usize = 8;
const NAME_MAX: usize = 24;
const FILE_MAX: usize = 20;
const SKILLS_MAX: usize = 30;
const GAP: &str = "  ";

struct Column {
    header: &'static str,
    sort_key: Option<SortKey>,
    max: usize,
}

const COLUMNS: [Column; 8] = [
    Column {
        header: "ID",
        sort_key: None,
        max: ID_WIDTH,
    },
    Column {
        header: "Name",
        sort_key: Some(SortKey::Name),
        max: NAME_MAX,
    },
    Column {
        header: "Age",
        sort_key: Some(SortKey::Age),
        max: 5,
    },
    Column {
        header: "Gender",
        sort_key: Some(SortKey::Gender),
        max: 8,
    },
    Column {
        header: "Status",
        sort_key: Some(SortKey::Status),
        max: 9,
    },
    Column {
        header: "Date of Birth",
        sort_key: Some(SortKey::DateOfBirth),
        max: 15,
    },
    Column {
        header: "File",
        sort_key: None,
        max: FILE_MAX,
    },
    Column {
        header: "Skills",
        sort_key: None,
        max: SKILLS_MAX,
    },
];

fn styled(style: &Style, text: &str, use_color: bool) -> String {
    style
        .clone()
        .force_styling(use_color)
        .apply_to(text)
        .to_string()
}

fn short_id(record: &Record) -> String {
    record.id.as_str().chars().take(ID_WIDTH).collect()
}

fn format_dob(record: &Record) -> String {
    record
        .date_of_birth
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn cells(record: &Record) -> [String; 8] {
    [
        short_id(record),
        record.name.clone(),
        record.age.to_string(),
        record.gender.to_string(),
        record.status.to_string(),
        format_dob(record),
        record
            .attachment
            .as_ref()
            .map(|a| a.file_name.clone())
            .unwrap_or_else(|| "-".to_string()),
        record.skills.join(", "),
    ]
}

fn header_text(column: &Column, sort: Option<SortDirective>) -> String {
    match (column.sort_key, sort) {
        (Some(key), Some(directive)) if directive.key == key => {
            let arrow = match directive.direction {
                SortDirection::Ascending => "▲",
                SortDirection::Descending => "▼",
            };
            format!("{} {}", column.header, arrow)
        }
        _ => column.header.to_string(),
    }
}

/// Renders one table page with a header, sort marker and range footer.
pub fn render_table(page: &Page<Record>, sort: Option<SortDirective>, use_color: bool) -> String {
    let styles = &*TABLE_STYLES;
    let mut output = String::new();

    if page.rows.is_empty() {
        output.push_str("No records found.\n");
        output.push_str(&styled(&styles.muted, &page.range_label(), use_color));
        output.push('\n');
        return output;
    }

    let headers: Vec<String> = COLUMNS.iter().map(|c| header_text(c, sort)).collect();
    let rows: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|r| {
            cells(r)
                .iter()
                .zip(COLUMNS.iter())
                .map(|(cell, col)| truncate_to_width(cell, col.max))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..COLUMNS.len())
        .map(|i| {
            rows.iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(headers[i].width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header_line: Vec<String> = headers
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| styled(&styles.header, &pad_to_width(h, *w), use_color))
        .collect();
    output.push_str(header_line.join(GAP).trim_end());
    output.push('\n');

    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(i, (cell, w))| {
                let padded = pad_to_width(cell, *w);
                match i {
                    0 => styled(&styles.id, &padded, use_color),
                    1 => styled(&styles.name, &padded, use_color),
                    _ => padded,
                }
            })
            .collect();
        output.push_str(line.join(GAP).trim_end());
        output.push('\n');
    }

    let footer = format!(
        "{}  ·  page {} of {}",
        page.range_label(),
        page.page_index + 1,
        page.page_count().max(1)
    );
    output.push('\n');
    output.push_str(&styled(&styles.muted, &footer, use_color));
    output.push('\n');
    output
}

/// Renders every field of each record, separated by blank lines.
pub fn render_records(records: &[Record], use_color: bool) -> String {
    let styles = &*TABLE_STYLES;
    let mut output = String::new();

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&styled(&styles.id, record.id.as_str(), use_color));
        output.push(' ');
        output.push_str(&styled(&styles.name, &record.name, use_color));
        output.push('\n');

        let attachment = record
            .attachment
            .as_ref()
            .map(|a| format!("{} ({} bytes, {})", a.file_name, a.size_bytes, a.location))
            .unwrap_or_else(|| "-".to_string());
        let fields = [
            ("Age", record.age.to_string()),
            ("Gender", record.gender.to_string()),
            ("Status", record.status.to_string()),
            ("Date of Birth", format_dob(record)),
            ("File", attachment),
            ("Terms", if record.terms_accepted { "accepted" } else { "not accepted" }.to_string()),
            ("Skills", record.skills.join(", ")),
        ];
        for (label, value) in fields {
            output.push_str(&format!(
                "  {} {}\n",
                styled(&styles.label, &pad_to_width(&format!("{}:", label), 15), use_color),
                value
            ));
        }
    }
    output
}

/// One line per field error, in field order.
pub fn render_validation(errors: &ValidationErrors, use_color: bool) -> String {
    let mut output = String::new();
    for (key, error) in errors.iter() {
        let line = format!("  {}: {}", key, error.message);
        if use_color {
            output.push_str(&line.red().to_string());
        } else {
            output.push_str(&line);
        }
        output.push('\n');
    }
    output
}

pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    let mut output = String::new();
    for message in messages {
        let line = if use_color {
            match message.level {
                MessageLevel::Info => message.content.dimmed().to_string(),
                MessageLevel::Success => message.content.green().to_string(),
                MessageLevel::Warning => message.content.yellow().to_string(),
                MessageLevel::Error => message.content.red().to_string(),
            }
        } else {
            message.content.clone()
        };
        output.push_str(&line);
        output.push('\n');
    }
    output
}

fn use_color() -> bool {
    console::colors_enabled()
}

pub fn print_table(page: &Page<Record>, sort: Option<SortDirective>) {
    print!("{}", render_table(page, sort, use_color()));
}

pub fn print_records(records: &[Record]) {
    print!("{}", render_records(records, use_color()));
}

pub fn print_validation(errors: &ValidationErrors) {
    print!("{}", render_validation(errors, use_color()));
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages, use_color()));
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
