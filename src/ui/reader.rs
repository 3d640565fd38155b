//! Reader view: rendered post with its table of contents

use crate::app::App;
use crate::state::{ReaderState, TocView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// TOC entries indented two columns per level below the root
fn toc_lines(toc: &TocView) -> Vec<Line<'static>> {
    toc.flatten()
        .into_iter()
        .map(|node| {
            let indent = "  ".repeat(node.depth.saturating_sub(1));
            let style = if node.depth == 1 {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("{indent}{}", node.label), style))
        })
        .collect()
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(reader) = app.state.reader.as_ref() else {
        return;
    };

    match &reader.toc {
        TocView::Hidden => draw_body(frame, area, reader),
        TocView::Visible { heading, .. } => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(32)])
                .split(area);
            draw_body(frame, chunks[0], reader);

            let toc = Paragraph::new(toc_lines(&reader.toc))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" {heading} "))
                        .border_style(Style::default().fg(Color::DarkGray)),
                )
                .wrap(Wrap { trim: false });
            frame.render_widget(toc, chunks[1]);
        }
    }
}

fn draw_body(frame: &mut Frame, area: Rect, reader: &ReaderState) {
    let title = if reader.document.title.is_empty() {
        " Untitled ".to_string()
    } else {
        format!(" {} ", reader.document.title)
    };
    let scroll = u16::try_from(reader.scroll_offset).unwrap_or(u16::MAX);
    let body = Paragraph::new(reader.document.body.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(body, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{build_toc, ContentItem, ContentList};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_toc_lines_indent_by_depth() {
        let list = ContentList {
            items: vec![ContentItem {
                label: "Intro".to_string(),
                nested: Some(ContentList {
                    items: vec![ContentItem {
                        label: "Setup".to_string(),
                        nested: None,
                    }],
                }),
            }],
        };
        let lines: Vec<String> = toc_lines(&build_toc(Some(&list)))
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(lines, vec!["Intro", "  Setup"]);
    }

    #[test]
    fn test_hidden_toc_has_no_lines() {
        assert!(toc_lines(&TocView::Hidden).is_empty());
    }
}
