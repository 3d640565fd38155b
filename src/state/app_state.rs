//! Application state definitions

use super::forms::FormState;
use super::toc::{build_toc, ContentDocument, TocView};
use super::wizard::RegistrationWizard;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Menu,
    Form,
    Wizard,
    Reader,
}

/// Entries of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    NewPost,
    NewProject,
    NewChangelog,
    EditDraft,
    Register,
    ChangePassword,
    SocialLinks,
    Reader,
    Quit,
}

impl MenuItem {
    pub const ALL: &'static [MenuItem] = &[
        MenuItem::NewPost,
        MenuItem::NewProject,
        MenuItem::NewChangelog,
        MenuItem::EditDraft,
        MenuItem::Register,
        MenuItem::ChangePassword,
        MenuItem::SocialLinks,
        MenuItem::Reader,
        MenuItem::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::NewPost => "New post",
            Self::NewProject => "New project",
            Self::NewChangelog => "New changelog entry",
            Self::EditDraft => "Edit existing content",
            Self::Register => "Sign up",
            Self::ChangePassword => "Change password",
            Self::SocialLinks => "Social links",
            Self::Reader => "Read post",
            Self::Quit => "Quit",
        }
    }
}

/// Reader view state, built once per load
#[derive(Debug, Clone)]
pub struct ReaderState {
    pub document: ContentDocument,
    pub toc: TocView,
    pub scroll_offset: usize,
}

impl ReaderState {
    pub fn new(document: ContentDocument) -> Self {
        let toc = build_toc(document.toc.as_ref());
        Self {
            document,
            toc,
            scroll_offset: 0,
        }
    }
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub selected_index: usize,

    // Forms
    pub form: FormState,
    parked_forms: Vec<FormState>,
    pub wizard: RegistrationWizard,

    // Reader
    pub reader: Option<ReaderState>,

    // Messages
    errors: Vec<String>,
    pub status_message: Option<String>,
}

fn same_target(a: &FormState, b: &FormState) -> bool {
    a.kind() == b.kind() && a.as_form().and_then(|f| f.uid()) == b.as_form().and_then(|f| f.uid())
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn selected_menu_item(&self) -> Option<MenuItem> {
        MenuItem::ALL.get(self.selected_index).copied()
    }

    /// Show a form, restoring a parked one for the same target if any
    pub fn open_form(&mut self, fresh: FormState) {
        self.form = match self.parked_forms.iter().position(|f| same_target(f, &fresh)) {
            Some(pos) => self.parked_forms.remove(pos),
            None => fresh,
        };
        self.current_view = View::Form;
    }

    /// Close the form without submitting; its input is kept for next time
    pub fn park_form(&mut self) {
        let mut form = std::mem::take(&mut self.form);
        if let Some(f) = form.as_form_mut() {
            f.on_close();
        }
        if !matches!(form, FormState::None) {
            self.parked_forms.push(form);
        }
        self.current_view = View::Menu;
    }

    /// Drop the form after a successful submission
    pub fn discard_form(&mut self) {
        self.form = FormState::None;
        self.current_view = View::Menu;
    }

    pub fn open_reader(&mut self, document: ContentDocument) {
        self.reader = Some(ReaderState::new(document));
        self.current_view = View::Reader;
    }

    pub fn scroll_down(&mut self) {
        if let Some(reader) = self.reader.as_mut() {
            reader.scroll_offset += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        if let Some(reader) = self.reader.as_mut() {
            reader.scroll_offset = reader.scroll_offset.saturating_sub(1);
        }
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: String) {
        tracing::debug!(%message, "error queued");
        self.errors.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Oldest error not yet dismissed
    pub fn current_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn dismiss_error(&mut self) {
        if !self.errors.is_empty() {
            self.errors.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{PostForm, ProjectForm};
    use pretty_assertions::assert_eq;

    mod menu_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_move_selection_bounds() {
            let mut state = AppState::default();
            state.move_selection_up();
            assert_eq!(state.selected_index, 0);
            for _ in 0..20 {
                state.move_selection_down(MenuItem::ALL.len());
            }
            assert_eq!(state.selected_index, MenuItem::ALL.len() - 1);
            assert_eq!(state.selected_menu_item(), Some(MenuItem::Quit));
        }

        #[test]
        fn test_every_item_has_label() {
            assert!(MenuItem::ALL.iter().all(|m| !m.label().is_empty()));
        }
    }

    mod error_queue_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_errors_dismissed_in_order() {
            let mut state = AppState::default();
            assert!(!state.has_errors());
            state.push_error("first".to_string());
            state.push_error("second".to_string());
            assert_eq!(state.error_count(), 2);
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            state.dismiss_error();
            assert!(!state.has_errors());
        }
    }

    mod form_parking_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_parked_form_is_restored() {
            let mut state = AppState::default();
            let mut form = PostForm::new();
            form.title.set_text("Half written".to_string());
            state.open_form(FormState::Post(form));
            state.park_form();
            assert_eq!(state.current_view, View::Menu);
            assert!(matches!(state.form, FormState::None));

            state.open_form(FormState::Post(PostForm::new()));
            let form = state.form.as_form().unwrap();
            assert_eq!(form.snapshot().get("title"), "Half written");
        }

        #[test]
        fn test_parking_collapses_optional_section() {
            let mut state = AppState::default();
            state.open_form(FormState::Project(ProjectForm::new(5)));
            assert!(state.form.reveal_section());
            if let FormState::Project(form) = &mut state.form {
                form.slug.fields[0].set_text("slug".to_string());
            }
            state.park_form();
            state.open_form(FormState::Project(ProjectForm::new(5)));
            let sections = state.form.as_form().unwrap().optional_sections();
            assert!(!sections[0].revealed);
            assert_eq!(sections[0].fields[0].as_text(), "");
        }

        #[test]
        fn test_different_edit_targets_do_not_mix() {
            let mut state = AppState::default();
            state.open_form(FormState::Post(PostForm::edit("a", Default::default())));
            state.park_form();
            state.open_form(FormState::Post(PostForm::edit("b", Default::default())));
            assert_eq!(state.form.as_form().unwrap().uid(), Some("b"));
        }

        #[test]
        fn test_discarded_form_is_not_restored() {
            let mut state = AppState::default();
            let mut form = PostForm::new();
            form.title.set_text("Sent".to_string());
            state.open_form(FormState::Post(form));
            state.discard_form();
            state.open_form(FormState::Post(PostForm::new()));
            assert_eq!(state.form.as_form().unwrap().snapshot().get("title"), "");
        }
    }

    #[test]
    fn test_reader_scroll() {
        let mut state = AppState::default();
        state.open_reader(ContentDocument::default());
        assert_eq!(state.current_view, View::Reader);
        assert!(state.reader.as_ref().unwrap().toc.is_hidden());
        state.scroll_up();
        state.scroll_down();
        state.scroll_down();
        assert_eq!(state.reader.as_ref().unwrap().scroll_offset, 2);
    }
}
