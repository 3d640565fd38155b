//! Main menu view

use super::components::{render_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::MenuItem;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of the centered button column
const MENU_WIDTH: u16 = 36;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Backstage ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(MenuItem::ALL.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let heading = Paragraph::new("What would you like to do?")
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(heading, centered(rows[0], MENU_WIDTH));

    // Rows past the bottom of a small terminal come back zero-sized
    for (idx, item) in MenuItem::ALL.iter().enumerate() {
        let row = centered(rows[idx + 1], MENU_WIDTH);
        if row.height < BUTTON_HEIGHT {
            continue;
        }
        render_button(frame, row, item.label(), idx == app.state.selected_index);
    }
}

fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
