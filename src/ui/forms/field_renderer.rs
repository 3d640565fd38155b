//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by a single-line field (border + value + border)
pub const SINGLE_LINE_HEIGHT: u16 = 3;
/// Rows taken by the multiline body editor
pub const MULTILINE_HEIGHT: u16 = 10;

pub fn field_height(field: &FormField) -> u16 {
    if field.is_multiline {
        MULTILINE_HEIGHT
    } else {
        SINGLE_LINE_HEIGHT
    }
}

/// First field to draw so the active one stays on screen
pub fn scroll_start(heights: &[u16], active: usize, available: u16) -> usize {
    let mut start = 0;
    while start < active {
        let used: u16 = heights[start..=active.min(heights.len().saturating_sub(1))]
            .iter()
            .sum();
        if used <= available {
            break;
        }
        start += 1;
    }
    start
}

/// Draw a form field using FormField from the domain layer
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let accent = if is_active { Color::Cyan } else { Color::DarkGray };
    let style = Style::default().fg(accent);

    let display_value = field.display_value();
    let display_str = if display_value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        display_value
    };

    // Toggles and choices change with Space, not typing
    let cursor = if is_active && field.is_text() { "▌" } else { "" };

    let content = if field.is_multiline {
        let mut lines: Vec<Line> = display_str
            .split('\n')
            .map(|l| Line::from(l.to_string()))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(cursor, style));
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_str, style),
            Span::styled(cursor, style),
        ]))
    };

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw a single line of key hints under a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, hints: &[String]) {
    let text = hints.join("  ");
    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_start_keeps_top_when_it_fits() {
        assert_eq!(scroll_start(&[3, 3, 3], 2, 20), 0);
    }

    #[test]
    fn test_scroll_start_follows_active_field() {
        // Fields 0..=4 need 15 rows, only 9 are available
        assert_eq!(scroll_start(&[3, 3, 3, 3, 3], 4, 9), 2);
    }

    #[test]
    fn test_scroll_start_with_tall_active_field() {
        assert_eq!(scroll_start(&[3, 3, 10], 2, 12), 2);
    }

    #[test]
    fn test_field_height_by_kind() {
        assert_eq!(field_height(&FormField::text("t", "T", false)), 3);
        assert_eq!(field_height(&FormField::text("b", "B", true)), 10);
    }
}
