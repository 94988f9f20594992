//! Rendering of the picker: input line, candidate list, status line

use crate::picker::Picker;
use ratatui::{
    layout::{Constraint, Layout},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// Draw the whole picker frame
pub fn render(frame: &mut Frame, picker: &Picker, status: &str) {
    let [input_area, list_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let input = Line::from(vec![
        Span::styled("> ", Style::new().bold()),
        Span::raw(picker.value()),
    ]);
    frame.render_widget(Paragraph::new(input), input_area);

    let rows = list_area.height as usize;
    let offset = scroll_offset(picker.selected_index(), picker.items().len(), rows);

    let lines: Vec<Line> = picker
        .items()
        .iter()
        .enumerate()
        .skip(offset)
        .take(rows)
        .map(|(i, item)| {
            let label = truncate(&item.label, list_area.width as usize);
            if Some(i) == picker.selected_index() {
                Line::from(Span::styled(label, Style::new().reversed()))
            } else {
                Line::from(Span::raw(label))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), list_area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            status.to_string(),
            Style::new().dim(),
        ))),
        status_area,
    );

    // put the terminal cursor at the end of the typed value
    let cursor_x = input_area.x + 2 + display_width(picker.value()) as u16;
    frame.set_cursor_position((
        cursor_x.min(input_area.right().saturating_sub(1)),
        input_area.y,
    ));
}

/// First visible row so the selection stays on screen
fn scroll_offset(selected: Option<usize>, total: usize, rows: usize) -> usize {
    let Some(selected) = selected else { return 0 };
    if rows == 0 || total <= rows {
        return 0;
    }
    if selected < rows {
        0
    } else {
        (selected + 1 - rows).min(total - rows)
    }
}

fn display_width(s: &str) -> usize {
    s.chars().filter_map(UnicodeWidthChar::width).sum()
}

fn truncate(s: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_keeps_selection_visible() {
        assert_eq!(scroll_offset(None, 100, 10), 0);
        assert_eq!(scroll_offset(Some(0), 100, 10), 0);
        assert_eq!(scroll_offset(Some(9), 100, 10), 0);
        assert_eq!(scroll_offset(Some(10), 100, 10), 1);
        assert_eq!(scroll_offset(Some(99), 100, 10), 90);
        // everything fits
        assert_eq!(scroll_offset(Some(3), 5, 10), 0);
    }

    #[test]
    fn test_truncate_by_display_width() {
        assert_eq!(truncate("abcdef", 4), "abcd");
        assert_eq!(truncate("abc", 4), "abc");
        // a double-width char does not squeeze past the limit
        assert_eq!(truncate("日本語", 4), "日本");
    }
}
