use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of the leading identifier column.
pub const ID_COLUMN_WIDTH: usize = 24;

/// Keeps the trailing characters whose combined display width fits `width`,
/// so paths stay recognisable by their final segment.
pub fn truncate_tail(value: &str, width: usize) -> String {
    if UnicodeWidthStr::width(value) <= width {
        return value.to_string();
    }
    let mut used = 0usize;
    let mut start = value.len();
    for (i, c) in value.char_indices().rev() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = i;
    }
    value[start..].to_string()
}

fn pad_right(value: String, width: usize) -> String {
    let w = UnicodeWidthStr::width(value.as_str());
    format!("{}{}", value, " ".repeat(width.saturating_sub(w)))
}

fn pad_left(value: String, width: usize) -> String {
    let w = UnicodeWidthStr::width(value.as_str());
    format!("{}{}", " ".repeat(width.saturating_sub(w)), value)
}

/// Lays out one row's fields into exactly `width` terminal columns.
///
/// The first field gets the fixed id column and the last field the remainder
/// (right-justified unless it is the only field). Middle fields take their
/// natural width but yield to the last field, keeping at least a quarter of
/// what is left.
pub fn layout_row(values: &[String], width: usize) -> String {
    let n = values.len();
    let last_width = values
        .last()
        .map(|v| UnicodeWidthStr::width(v.as_str()))
        .unwrap_or(0);
    let mut out = String::with_capacity(width);
    let mut used = 0usize;

    for (i, value) in values.iter().enumerate() {
        let remaining = width.saturating_sub(used);
        let (cell, slot) = if i + 1 == n {
            let v = truncate_tail(value, remaining);
            if n == 1 {
                (pad_right(v, remaining), remaining)
            } else {
                (pad_left(v, remaining), remaining)
            }
        } else if i == 0 {
            let slot = ID_COLUMN_WIDTH.min(remaining);
            (pad_right(truncate_tail(value, slot), slot), slot)
        } else {
            let natural = UnicodeWidthStr::width(value.as_str()) + 1;
            let share = remaining.saturating_sub(last_width).max(remaining / 4);
            // A column for each field still to come.
            let slot = natural
                .min(share)
                .min(remaining.saturating_sub(n - 1 - i));
            if slot == 0 {
                (String::new(), 0)
            } else {
                (pad_right(truncate_tail(value, slot - 1), slot), slot)
            }
        };
        used += slot;
        out.push_str(&cell);
    }

    if used < width {
        out.push_str(&" ".repeat(width - used));
    }
    out
}

#[cfg(test)]
#[path = "../tests/menu/layout_tests.rs"]
mod tests;
