//! Application state and core logic

use crate::config::BackstageConfig;
use crate::platform::is_shortcut;
use crate::service::{run_check, BackstageClient, BackstageClientTrait, CheckOutcome};
use crate::state::{
    classify_key, gate_submission, AppState, ChangelogForm, ContentDocument, EditTarget,
    FormError, FormState, KeyIntent, MenuItem, PasswordForm, PendingCheck, PostForm,
    ProjectForm, RegistrationWizard, SocialLinksForm, View, WizardEvent,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Registration POST path
const SIGNUP_PATH: &str = "/signup";

/// Outcome of a uniqueness check task, tagged with its ticket
#[derive(Debug)]
pub struct CheckResult {
    pub ticket: u64,
    pub outcome: CheckOutcome,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    pub config: BackstageConfig,
    /// Backstage server client
    client: Arc<dyn BackstageClientTrait>,
    check_tx: mpsc::UnboundedSender<CheckResult>,
    check_rx: mpsc::UnboundedReceiver<CheckResult>,
    /// Delayed read-count ping for the open post
    readcount_task: Option<JoinHandle<()>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance talking to the configured server
    pub fn new(config: BackstageConfig) -> Result<Self> {
        let client = BackstageClient::new(config.base_url(), config.check_timeout())?;
        tracing::info!(base_url = client.base_url(), "backstage client ready");
        Ok(Self::with_client(config, Arc::new(client)))
    }

    pub fn with_client(config: BackstageConfig, client: Arc<dyn BackstageClientTrait>) -> Self {
        let (check_tx, check_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            config,
            client,
            check_tx,
            check_rx,
            readcount_task: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Show a form error; advisory ones only go to the status bar
    fn report(&mut self, err: FormError) {
        if err.is_advisory() {
            self.state.status_message = Some(err.to_string());
        } else {
            self.push_error(err.to_string());
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Menu => self.handle_menu_key(key),
            View::Form => self.handle_form_key(key).await,
            View::Wizard => self.handle_wizard_key(key),
            View::Reader => self.handle_reader_key(key),
        }
        Ok(())
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.move_selection_down(MenuItem::ALL.len());
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Enter => {
                if let Some(item) = self.state.selected_menu_item() {
                    self.activate_menu_item(item);
                }
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    pub fn activate_menu_item(&mut self, item: MenuItem) {
        self.state.status_message = None;
        match item {
            MenuItem::NewPost => self.state.open_form(FormState::Post(PostForm::new())),
            MenuItem::NewProject => self.state.open_form(FormState::Project(ProjectForm::new(
                self.config.max_image_entries(),
            ))),
            MenuItem::NewChangelog => {
                self.state.open_form(FormState::Changelog(ChangelogForm::new()))
            }
            MenuItem::EditDraft => self.open_draft(),
            MenuItem::Register => self.state.current_view = View::Wizard,
            MenuItem::ChangePassword => {
                self.state.open_form(FormState::Password(PasswordForm::new()))
            }
            MenuItem::SocialLinks => self.state.open_form(FormState::SocialLinks(
                SocialLinksForm::new(self.config.max_social_links()),
            )),
            MenuItem::Reader => self.open_reader(),
            MenuItem::Quit => self.quit = true,
        }
    }

    fn open_draft(&mut self) {
        let Some(path) = self.config.draft_source.clone() else {
            self.push_error("No content to edit. Set BACKSTAGE_DRAFT to a JSON file.");
            return;
        };
        match EditTarget::load(&path) {
            Ok(target) => {
                let form = target.into_form_state(self.config.max_image_entries());
                self.state.open_form(form);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to load draft: {e:#}");
                self.push_error(format!("Failed to load {}: {}", path.display(), e));
            }
        }
    }

    async fn handle_form_key(&mut self, key: KeyEvent) {
        let in_multiline = self.state.form.is_active_field_multiline();
        match classify_key(&key, in_multiline) {
            KeyIntent::Submit => self.submit_form().await,
            KeyIntent::Newline => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.push_char('\n');
                }
            }
            KeyIntent::Suppressed => {}
            KeyIntent::Passthrough => self.handle_form_edit_key(key),
        }
    }

    fn handle_form_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.park_form(),
            KeyCode::Tab | KeyCode::Down => self.state.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Char('n') if is_shortcut(key.modifiers) => {
                if let Err(e) = self.state.form.add_entry() {
                    self.report(e);
                }
            }
            KeyCode::Char('d') if is_shortcut(key.modifiers) => {
                if let Err(e) = self.state.form.remove_focused_entry() {
                    self.report(e);
                }
            }
            KeyCode::Char('o') if is_shortcut(key.modifiers) => {
                self.state.form.reveal_section();
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.pop_char();
                }
            }
            _ => {}
        }
    }

    /// Validate the open form and POST it when the whole chain passes
    async fn submit_form(&mut self) {
        let Some(form) = self.state.form.as_form() else {
            return;
        };
        let kind = form.kind();
        let path = kind.submit_path(form.uid());
        let snapshot = match gate_submission(form) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.push_error(err.message);
                return;
            }
        };

        match self.client.submit_form(&path, &snapshot).await {
            Ok(()) => {
                tracing::info!(%path, "form submitted");
                self.state.discard_form();
                self.state.status_message = Some(format!("{} saved", kind.title()));
            }
            Err(e) => {
                tracing::warn!(%path, "form submission failed: {e:#}");
                self.push_error(format!("Failed to submit: {}", e));
            }
        }
    }

    fn handle_wizard_key(&mut self, key: KeyEvent) {
        match classify_key(&key, false) {
            KeyIntent::Submit => self.advance_wizard(),
            KeyIntent::Newline | KeyIntent::Suppressed => {}
            KeyIntent::Passthrough => match key.code {
                KeyCode::Esc => {
                    self.state.wizard.cancel();
                    self.state.status_message = None;
                    self.state.current_view = View::Menu;
                }
                KeyCode::Tab | KeyCode::Down => self.state.wizard.next_field(),
                KeyCode::BackTab | KeyCode::Up => self.state.wizard.prev_field(),
                // Values are frozen until the in-flight check resolves
                KeyCode::Char(_) | KeyCode::Backspace if self.state.wizard.is_pending() => {}
                KeyCode::Char(c) => {
                    if let Some(field) = self.state.wizard.get_active_field_mut() {
                        field.push_char(c);
                    }
                }
                KeyCode::Backspace => {
                    if let Some(field) = self.state.wizard.get_active_field_mut() {
                        field.pop_char();
                    }
                }
                _ => {}
            },
        }
    }

    fn advance_wizard(&mut self) {
        match self.state.wizard.advance() {
            Ok(check) => self.spawn_check(check),
            Err(FormError::CheckPending) => {
                self.state.status_message = Some(FormError::CheckPending.to_string());
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    /// Run a uniqueness check off the UI loop; its result comes back through
    /// `poll_checks`
    fn spawn_check(&mut self, check: PendingCheck) {
        let client = Arc::clone(&self.client);
        let tx = self.check_tx.clone();
        let timeout = self.config.check_timeout();
        self.state.status_message = Some("Checking availability...".to_string());

        tokio::spawn(async move {
            let outcome = run_check(client.as_ref(), &check.query, timeout, &check.cancel).await;
            // The receiver only goes away when the app shuts down
            let _ = tx.send(CheckResult {
                ticket: check.ticket,
                outcome,
            });
        });
    }

    /// Drain finished uniqueness checks into the wizard
    pub async fn poll_checks(&mut self) -> Result<()> {
        while let Ok(result) = self.check_rx.try_recv() {
            self.apply_check_result(result).await;
        }
        Ok(())
    }

    async fn apply_check_result(&mut self, result: CheckResult) {
        let event = self.state.wizard.resolve(result.ticket, result.outcome);
        if event != WizardEvent::Ignored {
            self.state.status_message = None;
        }
        match event {
            WizardEvent::AdvancedToStep2 => {}
            WizardEvent::ReadyToSubmit(payload) => {
                match self.client.submit_form(SIGNUP_PATH, &payload).await {
                    Ok(()) => {
                        tracing::info!("registration submitted");
                        self.state.wizard = RegistrationWizard::new();
                        self.state.current_view = View::Menu;
                        self.state.status_message = Some("Sign up succeeded.".to_string());
                    }
                    Err(e) => {
                        tracing::warn!("registration failed: {e:#}");
                        self.push_error(format!("Failed to submit: {}", e));
                    }
                }
            }
            WizardEvent::Rejected(err) => self.push_error(err.to_string()),
            WizardEvent::Ignored => {}
        }
    }

    fn open_reader(&mut self) {
        let Some(path) = self.config.toc_source.clone() else {
            self.push_error("No post to read. Set BACKSTAGE_TOC to a rendered post JSON file.");
            return;
        };
        match ContentDocument::load(&path) {
            Ok(document) => {
                let post_uid = document.post_uid.clone();
                self.state.open_reader(document);
                if let Some(uid) = post_uid {
                    self.schedule_read_count(uid);
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to load content: {e:#}");
                self.push_error(format!("Failed to load {}: {}", path.display(), e));
            }
        }
    }

    /// Ping the read counter once the post has been open for a moment
    fn schedule_read_count(&mut self, post_uid: String) {
        self.cancel_read_count();
        let client = Arc::clone(&self.client);
        let delay = self.config.readcount_delay();
        self.readcount_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = client.increment_read_count(&post_uid).await {
                tracing::warn!(%post_uid, "read count increment failed: {e:#}");
            }
        }));
    }

    fn cancel_read_count(&mut self) {
        if let Some(task) = self.readcount_task.take() {
            task.abort();
        }
    }

    fn handle_reader_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.cancel_read_count();
                self.state.current_view = View::Menu;
            }
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_up(),
            _ => {}
        }
    }
}
