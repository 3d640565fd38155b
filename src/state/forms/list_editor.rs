//! Bounded editor for repeatable sub-forms (project images, social links)
//!
//! Entries are always numbered densely `1..=n` in display order and every
//! sub-field identifier is `{role}-{order}`. Removing an entry renumbers the
//! ones after it; adding an entry always produces blank values.

use super::error::FormError;
use super::field::FormField;
use super::snapshot::FormSnapshot;

/// Platforms offered for social links
pub const SOCIAL_PLATFORMS: &[&str] = &[
    "facebook",
    "instagram",
    "twitter",
    "medium",
    "linkedin",
    "github",
];

/// Default cap on entries for both list surfaces
pub const DEFAULT_MAX_ENTRIES: usize = 5;

/// One sub-field of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubField {
    pub role: &'static str,
    pub label: &'static str,
    /// Select options; `None` for free text
    pub choices: Option<&'static [&'static str]>,
}

impl SubField {
    fn blank(&self, order: u32) -> FormField {
        let name = identifier(self.role, order);
        let label = format!("{} {order}", self.label);
        match self.choices {
            Some(options) => FormField::choice(&name, &label, options),
            None => FormField::text(&name, &label, false),
        }
    }
}

/// Shape shared by every entry of one editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListTemplate {
    /// Plural noun used in the bound warning ("images")
    pub noun: &'static str,
    pub sub_fields: &'static [SubField],
}

pub const PROJECT_IMAGES: ListTemplate = ListTemplate {
    noun: "images in your project cover",
    sub_fields: &[SubField {
        role: "url",
        label: "Image URL",
        choices: None,
    }],
};

pub const SOCIAL_LINKS: ListTemplate = ListTemplate {
    noun: "social links",
    sub_fields: &[
        SubField {
            role: "platform",
            label: "Platform",
            choices: Some(SOCIAL_PLATFORMS),
        },
        SubField {
            role: "url",
            label: "Link URL",
            choices: None,
        },
    ],
};

fn identifier(role: &str, order: u32) -> String {
    format!("{role}-{order}")
}

/// A single entry; `fields` follows the template's sub-field order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub order: u32,
    pub fields: Vec<FormField>,
}

impl ListEntry {
    fn blank(template: &ListTemplate, order: u32) -> Self {
        Self {
            order,
            fields: template.sub_fields.iter().map(|s| s.blank(order)).collect(),
        }
    }

    /// Value of the sub-field with `role`
    pub fn value(&self, role: &str) -> Option<&str> {
        let prefix = format!("{role}-");
        self.fields
            .iter()
            .find(|f| f.name.strip_prefix(&prefix).is_some())
            .map(|f| f.as_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicListEditor {
    template: ListTemplate,
    entries: Vec<ListEntry>,
    max_entries: usize,
    min_entries: usize,
}

impl DynamicListEditor {
    /// Create an editor holding one blank entry
    pub fn new(template: ListTemplate, max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            template,
            entries: vec![ListEntry::blank(&template, 1)],
            max_entries,
            min_entries: 1,
        }
    }

    /// Create an editor pre-filled with existing values, one slice per entry
    ///
    /// Values beyond the cap are dropped; an empty `rows` still yields one
    /// blank entry.
    pub fn with_values(template: ListTemplate, max_entries: usize, rows: &[Vec<String>]) -> Self {
        let mut editor = Self::new(template, max_entries);
        editor.entries.clear();
        for row in rows.iter().take(editor.max_entries) {
            let order = editor.entries.len() as u32 + 1;
            let mut entry = ListEntry::blank(&template, order);
            for (field, value) in entry.fields.iter_mut().zip(row) {
                if field.is_text() {
                    field.set_text(value.clone());
                } else {
                    field.select(value);
                }
            }
            editor.entries.push(entry);
        }
        if editor.entries.is_empty() {
            editor.entries.push(ListEntry::blank(&template, 1));
        }
        editor
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.max_entries
    }

    pub fn entry(&self, order: u32) -> Option<&ListEntry> {
        self.entries.iter().find(|e| e.order == order)
    }

    /// Append a blank entry, returning its order
    pub fn add_entry(&mut self) -> Result<u32, FormError> {
        if self.is_full() {
            tracing::debug!(max = self.max_entries, "list editor at capacity");
            return Err(FormError::BoundExceeded {
                max: self.max_entries,
                noun: self.template.noun,
            });
        }
        let order = self.entries.len() as u32 + 1;
        self.entries.push(ListEntry::blank(&self.template, order));
        Ok(order)
    }

    /// Remove the entry with `order` and renumber the rest
    pub fn remove_entry(&mut self, order: u32) -> Result<(), FormError> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.order == order)
            .ok_or(FormError::NoSuchEntry(order))?;
        if self.entries.len() <= self.min_entries {
            return Err(FormError::LastEntry);
        }
        self.entries.remove(idx);
        self.reindex();
        Ok(())
    }

    /// Renumber entries `1..=n` in display order and rewrite identifiers
    pub fn reindex(&mut self) {
        for (idx, entry) in self.entries.iter_mut().enumerate() {
            let order = idx as u32 + 1;
            entry.order = order;
            for (field, sub) in entry.fields.iter_mut().zip(self.template.sub_fields) {
                field.name = identifier(sub.role, order);
                field.label = format!("{} {order}", sub.label);
            }
        }
    }

    /// Mutable access to one sub-field
    pub fn field_mut(&mut self, order: u32, role: &str) -> Option<&mut FormField> {
        let name = identifier(role, order);
        self.entries
            .iter_mut()
            .find(|e| e.order == order)?
            .fields
            .iter_mut()
            .find(|f| f.name == name)
    }

    pub fn set_field(&mut self, order: u32, role: &str, value: &str) -> Result<(), FormError> {
        let field = self
            .field_mut(order, role)
            .ok_or(FormError::NoSuchEntry(order))?;
        if field.is_text() {
            field.set_text(value.to_string());
        } else {
            field.select(value);
        }
        Ok(())
    }

    /// Advance a select sub-field to its next option
    pub fn cycle_choice(&mut self, order: u32, role: &str) -> Result<(), FormError> {
        self.field_mut(order, role)
            .ok_or(FormError::NoSuchEntry(order))?
            .activate();
        Ok(())
    }

    /// Order of the entry owning the field called `name`, if any
    pub fn order_of(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.fields.iter().any(|f| f.name == name))
            .map(|e| e.order)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.entries.iter().flat_map(|e| e.fields.iter())
    }

    pub fn fields_mut(&mut self) -> impl Iterator<Item = &mut FormField> {
        self.entries.iter_mut().flat_map(|e| e.fields.iter_mut())
    }

    /// Every sub-field as `(identifier, value)` in display order
    pub fn serialize(&self) -> FormSnapshot {
        FormSnapshot::from_fields(self.fields())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_dense(editor: &DynamicListEditor) {
        for (i, entry) in editor.entries().iter().enumerate() {
            assert_eq!(entry.order, i as u32 + 1);
            for field in &entry.fields {
                assert!(
                    field.name.ends_with(&format!("-{}", i + 1)),
                    "{} is not numbered {}",
                    field.name,
                    i + 1
                );
            }
        }
    }

    fn filled(n: usize) -> DynamicListEditor {
        let mut editor = DynamicListEditor::new(PROJECT_IMAGES, DEFAULT_MAX_ENTRIES);
        editor.set_field(1, "url", "example.com/1.png").unwrap();
        for i in 2..=n {
            let order = editor.add_entry().unwrap();
            editor
                .set_field(order, "url", &format!("example.com/{i}.png"))
                .unwrap();
        }
        editor
    }

    mod bounds {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_new_has_one_blank_entry() {
            let editor = DynamicListEditor::new(PROJECT_IMAGES, 5);
            assert_eq!(editor.len(), 1);
            assert_eq!(editor.entries()[0].value("url"), Some(""));
        }

        #[test]
        fn test_sixth_add_is_rejected() {
            let mut editor = filled(5);
            let err = editor.add_entry().unwrap_err();
            assert!(matches!(err, FormError::BoundExceeded { max: 5, .. }));
            assert_eq!(editor.len(), 5);
        }

        #[test]
        fn test_cannot_remove_last_entry() {
            let mut editor = filled(1);
            assert_eq!(editor.remove_entry(1), Err(FormError::LastEntry));
            assert_eq!(editor.len(), 1);
            assert_eq!(editor.entries()[0].value("url"), Some("example.com/1.png"));
        }

        #[test]
        fn test_remove_unknown_order() {
            let mut editor = filled(2);
            assert_eq!(editor.remove_entry(7), Err(FormError::NoSuchEntry(7)));
        }

        #[test]
        fn test_zero_max_is_raised_to_one() {
            let editor = DynamicListEditor::new(PROJECT_IMAGES, 0);
            assert_eq!(editor.max_entries(), 1);
        }
    }

    mod ordering {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_dense_after_every_add_and_remove() {
            let mut editor = DynamicListEditor::new(SOCIAL_LINKS, 5);
            for _ in 0..4 {
                editor.add_entry().unwrap();
                assert_dense(&editor);
            }
            for order in [3, 1, 2, 1] {
                editor.remove_entry(order).unwrap();
                assert_dense(&editor);
            }
            assert_eq!(editor.len(), 1);
        }

        #[test]
        fn test_remove_middle_shifts_values() {
            let mut editor = filled(3);
            editor.remove_entry(2).unwrap();
            let snapshot = editor.serialize();
            let ids: Vec<&str> = snapshot.pairs().iter().map(|(id, _)| id.as_str()).collect();
            assert_eq!(ids, vec!["url-1", "url-2"]);
            assert_eq!(editor.entry(2).unwrap().value("url"), Some("example.com/3.png"));
        }

        #[test]
        fn test_reindex_is_idempotent() {
            let mut editor = filled(4);
            editor.remove_entry(1).unwrap();
            let once = editor.clone();
            editor.reindex();
            assert_eq!(editor, once);
            editor.reindex();
            assert_eq!(editor, once);
        }
    }

    mod reuse {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_remove_then_add_yields_blank_tail() {
            let mut editor = filled(3);
            editor.remove_entry(3).unwrap();
            let order = editor.add_entry().unwrap();
            assert_eq!(order, 3);
            assert_eq!(editor.entry(3).unwrap().value("url"), Some(""));
        }

        #[test]
        fn test_select_resets_to_first_option() {
            let mut editor = DynamicListEditor::new(SOCIAL_LINKS, 5);
            editor.add_entry().unwrap();
            editor.set_field(2, "platform", "github").unwrap();
            editor.set_field(2, "url", "https://github.com/me").unwrap();
            editor.remove_entry(2).unwrap();
            editor.add_entry().unwrap();
            let entry = editor.entry(2).unwrap();
            assert_eq!(entry.value("platform"), Some("facebook"));
            assert_eq!(entry.value("url"), Some(""));
        }
    }

    mod serialization {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_serialize_to_snapshot() {
            let mut editor = DynamicListEditor::new(SOCIAL_LINKS, 5);
            editor.set_field(1, "platform", "medium").unwrap();
            editor.set_field(1, "url", "https://medium.com/@me").unwrap();
            let snapshot = editor.serialize();
            assert_eq!(snapshot.get("platform-1"), "medium");
            assert_eq!(snapshot.entries("url"), vec![(1, "https://medium.com/@me")]);
        }

        #[test]
        fn test_cycle_choice_wraps_platforms() {
            let mut editor = DynamicListEditor::new(SOCIAL_LINKS, 5);
            editor.cycle_choice(1, "platform").unwrap();
            assert_eq!(editor.serialize().get("platform-1"), "instagram");
            for _ in 0..5 {
                editor.cycle_choice(1, "platform").unwrap();
            }
            assert_eq!(editor.serialize().get("platform-1"), "facebook");
            assert_eq!(
                editor.cycle_choice(3, "platform"),
                Err(FormError::NoSuchEntry(3))
            );
        }

        #[test]
        fn test_with_values_caps_rows() {
            let rows: Vec<Vec<String>> = (0..7).map(|i| vec![format!("a.com/{i}")]).collect();
            let editor = DynamicListEditor::with_values(PROJECT_IMAGES, 5, &rows);
            assert_eq!(editor.len(), 5);
            assert_dense(&editor);
        }

        #[test]
        fn test_order_of_field() {
            let editor = filled(2);
            assert_eq!(editor.order_of("url-2"), Some(2));
            assert_eq!(editor.order_of("title"), None);
        }
    }
}
