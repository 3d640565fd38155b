//! Create/edit form view for posts, projects, changelogs and settings

use super::field_renderer::{draw_field, draw_help_text, field_height, scroll_start};
use crate::app::App;
use crate::platform::{
    ADD_ENTRY_SHORTCUT, REMOVE_ENTRY_SHORTCUT, REVEAL_SECTION_SHORTCUT, SUBMIT_SHORTCUT,
};
use crate::state::Form;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Key hints for what this form supports
fn form_hints(form: &dyn Form) -> Vec<String> {
    let mut hints = vec![format!("{SUBMIT_SHORTCUT}:submit")];
    if let Some(editor) = form.list_editor() {
        hints.push(format!(
            "{ADD_ENTRY_SHORTCUT}:add ({}/{})",
            editor.len(),
            editor.max_entries()
        ));
        hints.push(format!("{REMOVE_ENTRY_SHORTCUT}:remove"));
    }
    if let Some(section) = form.next_collapsed_section() {
        hints.push(format!("{REVEAL_SECTION_SHORTCUT}:add {}", section.label()));
    }
    hints
}

pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = app.state.form.as_form() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", form.kind().title()))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);
    let (fields_area, help_area) = (chunks[0], chunks[1]);

    let fields = form.fields();
    let heights: Vec<u16> = fields.iter().map(|f| field_height(f)).collect();
    let active = form.active_field();
    let start = scroll_start(&heights, active, fields_area.height);

    let mut y = fields_area.y;
    let bottom = fields_area.y + fields_area.height;
    for (index, field) in fields.iter().enumerate().skip(start) {
        let height = heights[index];
        if y + height > bottom {
            break;
        }
        let field_area = Rect::new(fields_area.x, y, fields_area.width, height);
        draw_field(frame, field_area, field, index == active);
        y += height;
    }

    draw_help_text(frame, help_area, &form_hints(form));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ChangelogForm, PasswordForm, PostForm, ProjectForm};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hints_for_plain_form() {
        assert_eq!(form_hints(&PasswordForm::new()), vec!["Ctrl+S:submit"]);
    }

    #[test]
    fn test_hints_show_list_capacity() {
        let hints = form_hints(&ProjectForm::new(5));
        assert!(hints.iter().any(|h| h.ends_with(":add (1/5)")));
        assert!(hints.iter().any(|h| h.ends_with(":add custom slug")));
    }

    #[test]
    fn test_reveal_hint_names_next_post_section() {
        let mut form = PostForm::new();
        assert!(form_hints(&form).iter().any(|h| h.ends_with(":add cover url")));
        form.cover.reveal();
        assert!(form_hints(&form).iter().any(|h| h.ends_with(":add custom slug")));
        form.slug.reveal();
        assert_eq!(form_hints(&form).len(), 1);
    }

    #[test]
    fn test_reveal_hint_hidden_once_revealed() {
        let mut form = ChangelogForm::new();
        form.link.reveal();
        assert_eq!(form_hints(&form).len(), 1);
    }
}
