//! Two-step sign up view

use super::field_renderer::{draw_field, draw_help_text, field_height};
use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{RegistrationWizard, WizardStep};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn step_line(wizard: &RegistrationWizard) -> Line<'static> {
    let (number, action) = match wizard.step() {
        WizardStep::Step1 => (1, "next"),
        WizardStep::Step2 => (2, "sign up"),
    };
    let mut spans = vec![
        Span::styled(
            format!("Step {number} of 2"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  {SUBMIT_SHORTCUT}:{action}  Esc:cancel")),
    ];
    if wizard.is_pending() {
        spans.push(Span::styled(
            "  Checking availability...",
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::from(spans)
}

pub fn draw_wizard(frame: &mut Frame, area: Rect, app: &App) {
    let wizard = &app.state.wizard;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Sign Up ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = wizard.fields();
    let mut constraints = vec![Constraint::Length(1), Constraint::Length(1)];
    constraints.extend(fields.iter().map(|f| Constraint::Length(field_height(f))));
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    frame.render_widget(Paragraph::new(step_line(wizard)), chunks[0]);

    for (index, field) in fields.iter().enumerate() {
        draw_field(
            frame,
            chunks[index + 2],
            field,
            index == wizard.active_field_index,
        );
    }

    let hints = vec!["Tab:next field".to_string(), "Space:toggle".to_string()];
    draw_help_text(frame, chunks[chunks.len() - 1], &hints);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_step_line_on_first_step() {
        let wizard = RegistrationWizard::new();
        let line = text(&step_line(&wizard));
        assert!(line.starts_with("Step 1 of 2"));
        assert!(!line.contains("Checking"));
    }

    #[test]
    fn test_step_line_while_checking() {
        let mut wizard = RegistrationWizard::new();
        let check = wizard.advance_from_step1("a@b.com", "Abcdefgh");
        assert!(check.is_ok());
        assert!(text(&step_line(&wizard)).contains("Checking availability"));
    }
}
