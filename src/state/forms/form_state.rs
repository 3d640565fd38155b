//! Form state management and form structs

use super::editor::{body_field, RichTextEditor};
use super::error::FormError;
use super::field::FormField;
use super::list_editor::{DynamicListEditor, PROJECT_IMAGES, SOCIAL_LINKS};
use super::rules;
use super::snapshot::FormSnapshot;
use super::validator::Rule;
use serde::Deserialize;

/// Changelog categories, the first is the default
pub const CHANGELOG_CATEGORIES: &[&str] = &["Career", "Personal", "About this site", "Others"];

/// Every backstage form that submits through the validator chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    NewPost,
    EditPost,
    NewProject,
    EditProject,
    NewChangelog,
    EditChangelog,
    PasswordChange,
    SocialLinks,
}

impl FormKind {
    /// Validation chain, evaluated in order at submission
    pub fn rules(self) -> &'static [Rule] {
        match self {
            Self::NewPost => rules::NEW_POST,
            Self::EditPost => rules::EDIT_POST,
            Self::NewProject => rules::NEW_PROJECT,
            Self::EditProject => rules::EDIT_PROJECT,
            Self::NewChangelog | Self::EditChangelog => rules::CHANGELOG,
            Self::PasswordChange => rules::PASSWORD_CHANGE,
            Self::SocialLinks => rules::SOCIAL_LINKS,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::NewPost => "New Post",
            Self::EditPost => "Edit Post",
            Self::NewProject => "New Project",
            Self::EditProject => "Edit Project",
            Self::NewChangelog => "New Changelog",
            Self::EditChangelog => "Edit Changelog",
            Self::PasswordChange => "Change Password",
            Self::SocialLinks => "Social Links",
        }
    }

    /// Backstage path the form is POSTed to
    pub fn submit_path(self, uid: Option<&str>) -> String {
        let uid = uid.unwrap_or_default();
        match self {
            Self::NewPost => "/backstage/posts".to_string(),
            Self::EditPost => format!("/backstage/edit/post/{uid}"),
            Self::NewProject => "/backstage/projects".to_string(),
            Self::EditProject => format!("/backstage/edit/project/{uid}"),
            Self::NewChangelog => "/backstage/changelog".to_string(),
            Self::EditChangelog => format!("/backstage/edit/changelog/{uid}"),
            Self::PasswordChange | Self::SocialLinks => "/backstage/settings".to_string(),
        }
    }
}

/// Fields hidden behind an "add" toggle until the author asks for them
///
/// Collapsing clears the values, so a closed section never submits stale
/// input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionalSection {
    pub fields: Vec<FormField>,
    pub revealed: bool,
}

impl OptionalSection {
    pub fn collapsed(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            revealed: false,
        }
    }

    pub fn revealed(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            revealed: true,
        }
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub fn collapse(&mut self) {
        self.revealed = false;
        for field in &mut self.fields {
            field.clear();
        }
    }

    /// Hint label, taken from the first field
    pub fn label(&self) -> String {
        self.fields
            .first()
            .map(|f| f.label.to_lowercase())
            .unwrap_or_default()
    }

    fn has_values(&self) -> bool {
        self.fields.iter().any(|f| !f.as_text().is_empty())
    }

    fn visible(&self) -> &[FormField] {
        if self.revealed {
            &self.fields
        } else {
            &[]
        }
    }

    fn visible_mut(&mut self) -> &mut [FormField] {
        if self.revealed {
            &mut self.fields
        } else {
            &mut []
        }
    }
}

/// Trait for common form operations
pub trait Form {
    fn kind(&self) -> FormKind;
    /// Visible fields in tab order
    fn fields(&self) -> Vec<&FormField>;
    fn fields_mut(&mut self) -> Vec<&mut FormField>;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);

    fn field_count(&self) -> usize {
        self.fields().len()
    }
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        let index = self.active_field();
        self.fields_mut().into_iter().nth(index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields().get(index).copied()
    }
    /// Server uid for edit forms
    fn uid(&self) -> Option<&str> {
        None
    }
    fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::from_fields(self.fields())
    }
    fn list_editor(&self) -> Option<&DynamicListEditor> {
        None
    }
    fn list_editor_mut(&mut self) -> Option<&mut DynamicListEditor> {
        None
    }
    /// Markdown body, when the form has one
    fn body(&self) -> Option<&dyn RichTextEditor> {
        None
    }
    /// Optional sections in display order
    fn optional_sections(&self) -> Vec<&OptionalSection> {
        Vec::new()
    }
    /// Sections the author may reveal and collapse
    fn optional_sections_mut(&mut self) -> Vec<&mut OptionalSection> {
        Vec::new()
    }
    /// The section the reveal shortcut opens next
    fn next_collapsed_section(&self) -> Option<&OptionalSection> {
        self.optional_sections().into_iter().find(|s| !s.revealed)
    }
    /// Called when the form is dismissed without submitting
    fn on_close(&mut self) {
        for section in self.optional_sections_mut() {
            section.collapse();
        }
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field(current.min(count.saturating_sub(1)));
    }
}

fn clamp(index: usize, count: usize) -> usize {
    index.min(count.saturating_sub(1))
}

/// Existing post loaded for editing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostDraft {
    pub title: String,
    pub subtitle: String,
    pub tags: String,
    pub cover_url: String,
    pub custom_slug: String,
    pub content: String,
}

/// Existing project loaded for editing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectDraft {
    pub title: String,
    pub desc: String,
    pub tags: String,
    pub custom_slug: String,
    pub images: Vec<String>,
    pub content: String,
}

/// Existing changelog entry loaded for editing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChangelogDraft {
    pub title: String,
    pub date: String,
    pub category: String,
    pub tags: String,
    pub link: String,
    pub link_description: String,
    pub content: String,
}

/// Existing content to open in an edit form, as read from a JSON file
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditTarget {
    Post {
        uid: String,
        #[serde(default)]
        draft: PostDraft,
    },
    Project {
        uid: String,
        #[serde(default)]
        draft: ProjectDraft,
    },
    Changelog {
        uid: String,
        #[serde(default)]
        draft: ChangelogDraft,
    },
}

impl EditTarget {
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn into_form_state(self, max_images: usize) -> FormState {
        match self {
            EditTarget::Post { uid, draft } => FormState::Post(PostForm::edit(&uid, draft)),
            EditTarget::Project { uid, draft } => {
                FormState::Project(ProjectForm::edit(&uid, draft, max_images))
            }
            EditTarget::Changelog { uid, draft } => {
                FormState::Changelog(ChangelogForm::edit(&uid, draft))
            }
        }
    }
}

// Post Form
#[derive(Debug, Clone)]
pub struct PostForm {
    pub uid: Option<String>,
    pub title: FormField,
    pub subtitle: FormField,
    pub tags: FormField,
    pub cover: OptionalSection,
    pub slug: OptionalSection,
    pub body: FormField,
    pub active_field_index: usize,
}

impl PostForm {
    pub fn new() -> Self {
        Self::from_draft(None, PostDraft::default())
    }

    /// Edit forms show the cover and slug fields outright
    pub fn edit(uid: &str, draft: PostDraft) -> Self {
        let mut form = Self::from_draft(Some(uid.to_string()), draft);
        form.cover.reveal();
        form.slug.reveal();
        form
    }

    fn from_draft(uid: Option<String>, draft: PostDraft) -> Self {
        Self {
            uid,
            title: FormField::text_with_value("title", "Title", draft.title, false),
            subtitle: FormField::text_with_value("subtitle", "Subtitle", draft.subtitle, false),
            tags: FormField::text_with_value("tags", "Tags (comma separated)", draft.tags, false),
            cover: OptionalSection::collapsed(vec![FormField::text_with_value(
                "cover_url",
                "Cover URL",
                draft.cover_url,
                false,
            )]),
            slug: OptionalSection::collapsed(vec![FormField::text_with_value(
                "custom_slug",
                "Custom slug",
                draft.custom_slug,
                false,
            )]),
            body: body_field("Content (Markdown)", draft.content),
            active_field_index: 0,
        }
    }
}

impl Default for PostForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for PostForm {
    fn kind(&self) -> FormKind {
        if self.uid.is_some() {
            FormKind::EditPost
        } else {
            FormKind::NewPost
        }
    }
    fn fields(&self) -> Vec<&FormField> {
        let mut fields = vec![&self.title, &self.subtitle, &self.tags];
        fields.extend(self.cover.visible());
        fields.extend(self.slug.visible());
        fields.push(&self.body);
        fields
    }
    fn fields_mut(&mut self) -> Vec<&mut FormField> {
        let mut fields = vec![&mut self.title, &mut self.subtitle, &mut self.tags];
        fields.extend(self.cover.visible_mut().iter_mut());
        fields.extend(self.slug.visible_mut().iter_mut());
        fields.push(&mut self.body);
        fields
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = clamp(index, self.field_count());
    }
    fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }
    fn body(&self) -> Option<&dyn RichTextEditor> {
        Some(&self.body)
    }
    fn optional_sections(&self) -> Vec<&OptionalSection> {
        vec![&self.cover, &self.slug]
    }
    fn optional_sections_mut(&mut self) -> Vec<&mut OptionalSection> {
        if self.uid.is_some() {
            Vec::new()
        } else {
            vec![&mut self.cover, &mut self.slug]
        }
    }
}

// Project Form
#[derive(Debug, Clone)]
pub struct ProjectForm {
    pub uid: Option<String>,
    pub title: FormField,
    pub desc: FormField,
    pub tags: FormField,
    pub slug: OptionalSection,
    pub images: DynamicListEditor,
    pub body: FormField,
    pub active_field_index: usize,
}

impl ProjectForm {
    pub fn new(max_images: usize) -> Self {
        Self {
            uid: None,
            title: FormField::text("title", "Title", false),
            desc: FormField::text("desc", "Short description", false),
            tags: FormField::text("tags", "Tags (comma separated)", false),
            slug: OptionalSection::collapsed(vec![FormField::text(
                "custom_slug",
                "Custom slug",
                false,
            )]),
            images: DynamicListEditor::new(PROJECT_IMAGES, max_images),
            body: body_field("Content (Markdown)", String::new()),
            active_field_index: 0,
        }
    }

    /// Edit forms always show the slug, which is required there
    pub fn edit(uid: &str, draft: ProjectDraft, max_images: usize) -> Self {
        let rows: Vec<Vec<String>> = draft.images.into_iter().map(|url| vec![url]).collect();
        Self {
            uid: Some(uid.to_string()),
            title: FormField::text_with_value("title", "Title", draft.title, false),
            desc: FormField::text_with_value("desc", "Short description", draft.desc, false),
            tags: FormField::text_with_value("tags", "Tags (comma separated)", draft.tags, false),
            slug: OptionalSection::revealed(vec![FormField::text_with_value(
                "custom_slug",
                "Custom slug",
                draft.custom_slug,
                false,
            )]),
            images: DynamicListEditor::with_values(PROJECT_IMAGES, max_images, &rows),
            body: body_field("Content (Markdown)", draft.content),
            active_field_index: 0,
        }
    }
}

impl Form for ProjectForm {
    fn kind(&self) -> FormKind {
        if self.uid.is_some() {
            FormKind::EditProject
        } else {
            FormKind::NewProject
        }
    }
    fn fields(&self) -> Vec<&FormField> {
        let mut fields = vec![&self.title, &self.desc, &self.tags];
        fields.extend(self.slug.visible());
        fields.extend(self.images.fields());
        fields.push(&self.body);
        fields
    }
    fn fields_mut(&mut self) -> Vec<&mut FormField> {
        let mut fields = vec![&mut self.title, &mut self.desc, &mut self.tags];
        fields.extend(self.slug.visible_mut().iter_mut());
        fields.extend(self.images.fields_mut());
        fields.push(&mut self.body);
        fields
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = clamp(index, self.field_count());
    }
    fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }
    fn list_editor(&self) -> Option<&DynamicListEditor> {
        Some(&self.images)
    }
    fn list_editor_mut(&mut self) -> Option<&mut DynamicListEditor> {
        Some(&mut self.images)
    }
    fn body(&self) -> Option<&dyn RichTextEditor> {
        Some(&self.body)
    }
    fn optional_sections(&self) -> Vec<&OptionalSection> {
        vec![&self.slug]
    }
    fn optional_sections_mut(&mut self) -> Vec<&mut OptionalSection> {
        // The edit form's slug is mandatory and cannot be collapsed
        if self.uid.is_some() {
            Vec::new()
        } else {
            vec![&mut self.slug]
        }
    }
}

// Changelog Form
#[derive(Debug, Clone)]
pub struct ChangelogForm {
    pub uid: Option<String>,
    pub title: FormField,
    pub date: FormField,
    pub category: FormField,
    pub tags: FormField,
    pub link: OptionalSection,
    pub body: FormField,
    pub active_field_index: usize,
}

impl ChangelogForm {
    /// New entries default to today's date
    pub fn new() -> Self {
        let today = chrono::Local::now().format("%m/%d/%Y").to_string();
        let mut form = Self::from_draft(None, ChangelogDraft::default());
        form.date.set_text(today);
        form
    }

    pub fn edit(uid: &str, draft: ChangelogDraft) -> Self {
        let mut form = Self::from_draft(Some(uid.to_string()), draft);
        if form.link.has_values() {
            form.link.reveal();
        }
        form
    }

    fn from_draft(uid: Option<String>, draft: ChangelogDraft) -> Self {
        let mut category = FormField::choice("category", "Category", CHANGELOG_CATEGORIES);
        category.select(&draft.category);
        Self {
            uid,
            title: FormField::text_with_value("title", "Title", draft.title, false),
            date: FormField::text_with_value("date", "Date (MM/DD/YYYY)", draft.date, false),
            category,
            tags: FormField::text_with_value("tags", "Tags (comma separated)", draft.tags, false),
            link: OptionalSection::collapsed(vec![
                FormField::text_with_value("link", "Link", draft.link, false),
                FormField::text_with_value(
                    "link_description",
                    "Link description",
                    draft.link_description,
                    false,
                ),
            ]),
            body: body_field("Content (Markdown)", draft.content),
            active_field_index: 0,
        }
    }
}

impl Default for ChangelogForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for ChangelogForm {
    fn kind(&self) -> FormKind {
        if self.uid.is_some() {
            FormKind::EditChangelog
        } else {
            FormKind::NewChangelog
        }
    }
    fn fields(&self) -> Vec<&FormField> {
        let mut fields = vec![&self.title, &self.date, &self.category, &self.tags];
        fields.extend(self.link.visible());
        fields.push(&self.body);
        fields
    }
    fn fields_mut(&mut self) -> Vec<&mut FormField> {
        let mut fields = vec![
            &mut self.title,
            &mut self.date,
            &mut self.category,
            &mut self.tags,
        ];
        fields.extend(self.link.visible_mut().iter_mut());
        fields.push(&mut self.body);
        fields
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = clamp(index, self.field_count());
    }
    fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }
    fn body(&self) -> Option<&dyn RichTextEditor> {
        Some(&self.body)
    }
    fn optional_sections(&self) -> Vec<&OptionalSection> {
        vec![&self.link]
    }
    fn optional_sections_mut(&mut self) -> Vec<&mut OptionalSection> {
        vec![&mut self.link]
    }
}

// Password Form
#[derive(Debug, Clone)]
pub struct PasswordForm {
    pub current_pw: FormField,
    pub new_pw: FormField,
    pub new_pw_repeat: FormField,
    pub active_field_index: usize,
}

impl PasswordForm {
    pub fn new() -> Self {
        Self {
            current_pw: FormField::secret("current_pw", "Current password"),
            new_pw: FormField::secret("new_pw", "New password"),
            new_pw_repeat: FormField::secret("new_pw_repeat", "Repeat new password"),
            active_field_index: 0,
        }
    }
}

impl Default for PasswordForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for PasswordForm {
    fn kind(&self) -> FormKind {
        FormKind::PasswordChange
    }
    fn fields(&self) -> Vec<&FormField> {
        vec![&self.current_pw, &self.new_pw, &self.new_pw_repeat]
    }
    fn fields_mut(&mut self) -> Vec<&mut FormField> {
        vec![
            &mut self.current_pw,
            &mut self.new_pw,
            &mut self.new_pw_repeat,
        ]
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = clamp(index, 3);
    }
}

// Social Links Form
#[derive(Debug, Clone)]
pub struct SocialLinksForm {
    pub links: DynamicListEditor,
    pub active_field_index: usize,
}

impl SocialLinksForm {
    pub fn new(max_links: usize) -> Self {
        Self {
            links: DynamicListEditor::new(SOCIAL_LINKS, max_links),
            active_field_index: 0,
        }
    }
}

impl Form for SocialLinksForm {
    fn kind(&self) -> FormKind {
        FormKind::SocialLinks
    }
    fn fields(&self) -> Vec<&FormField> {
        self.links.fields().collect()
    }
    fn fields_mut(&mut self) -> Vec<&mut FormField> {
        self.links.fields_mut().collect()
    }
    fn snapshot(&self) -> FormSnapshot {
        self.links.serialize()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = clamp(index, self.field_count());
    }
    fn list_editor(&self) -> Option<&DynamicListEditor> {
        Some(&self.links)
    }
    fn list_editor_mut(&mut self) -> Option<&mut DynamicListEditor> {
        Some(&mut self.links)
    }
}

/// Enum representing all possible form states
#[derive(Debug, Clone, Default)]
pub enum FormState {
    #[default]
    None,
    Post(PostForm),
    Project(ProjectForm),
    Changelog(ChangelogForm),
    Password(PasswordForm),
    SocialLinks(SocialLinksForm),
}

impl FormState {
    pub fn as_form(&self) -> Option<&dyn Form> {
        match self {
            FormState::None => None,
            FormState::Post(f) => Some(f),
            FormState::Project(f) => Some(f),
            FormState::Changelog(f) => Some(f),
            FormState::Password(f) => Some(f),
            FormState::SocialLinks(f) => Some(f),
        }
    }

    pub fn as_form_mut(&mut self) -> Option<&mut dyn Form> {
        match self {
            FormState::None => None,
            FormState::Post(f) => Some(f),
            FormState::Project(f) => Some(f),
            FormState::Changelog(f) => Some(f),
            FormState::Password(f) => Some(f),
            FormState::SocialLinks(f) => Some(f),
        }
    }

    pub fn kind(&self) -> Option<FormKind> {
        self.as_form().map(|f| f.kind())
    }

    pub fn next_field(&mut self) {
        if let Some(form) = self.as_form_mut() {
            form.next_field();
        }
    }

    pub fn prev_field(&mut self) {
        if let Some(form) = self.as_form_mut() {
            form.prev_field();
        }
    }

    pub fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.as_form_mut()?.get_active_field_mut()
    }

    pub fn is_active_field_multiline(&self) -> bool {
        self.as_form()
            .and_then(|f| f.get_field(f.active_field()))
            .is_some_and(|f| f.is_multiline)
    }

    /// Append an entry to the form's list editor
    pub fn add_entry(&mut self) -> Result<(), FormError> {
        match self.as_form_mut().and_then(|f| f.list_editor_mut()) {
            Some(editor) => editor.add_entry().map(|_| ()),
            None => Err(FormError::NotOnStep),
        }
    }

    /// Remove the list entry that owns the focused field
    ///
    /// Returns `Ok(false)` when focus is not on a list entry.
    pub fn remove_focused_entry(&mut self) -> Result<bool, FormError> {
        let Some(form) = self.as_form_mut() else {
            return Ok(false);
        };
        let Some(name) = form.get_field(form.active_field()).map(|f| f.name.clone()) else {
            return Ok(false);
        };
        let Some(editor) = form.list_editor_mut() else {
            return Ok(false);
        };
        let Some(order) = editor.order_of(&name) else {
            return Ok(false);
        };
        editor.remove_entry(order)?;
        let current = form.active_field();
        form.set_active_field(current);
        Ok(true)
    }

    /// Show the form's next collapsed optional section
    pub fn reveal_section(&mut self) -> bool {
        let Some(form) = self.as_form_mut() else {
            return false;
        };
        match form.optional_sections_mut().into_iter().find(|s| !s.revealed) {
            Some(section) => {
                section.reveal();
                true
            }
            None => false,
        }
    }
}
