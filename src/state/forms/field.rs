//! Form field value objects

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Toggle(bool),
    Choice {
        options: &'static [&'static str],
        selected: usize,
    },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
    pub is_multiline: bool,
    /// Rendered masked (passwords)
    pub is_secret: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str, is_multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
            is_multiline,
            is_secret: false,
        }
    }

    /// Create a new text field with initial value
    pub fn text_with_value(name: &str, label: &str, value: String, is_multiline: bool) -> Self {
        Self {
            value: FieldValue::Text(value),
            ..Self::text(name, label, is_multiline)
        }
    }

    /// Create a masked single-line field
    pub fn secret(name: &str, label: &str) -> Self {
        Self {
            is_secret: true,
            ..Self::text(name, label, false)
        }
    }

    /// Create a checkbox field
    pub fn toggle(name: &str, label: &str) -> Self {
        Self {
            value: FieldValue::Toggle(false),
            ..Self::text(name, label, false)
        }
    }

    /// Create a select field; the first option is the default
    pub fn choice(name: &str, label: &str, options: &'static [&'static str]) -> Self {
        Self {
            value: FieldValue::Choice {
                options,
                selected: 0,
            },
            ..Self::text(name, label, false)
        }
    }

    /// Get the submitted value as text
    ///
    /// Checkboxes submit `"y"` when checked and nothing otherwise, selects
    /// submit the selected option.
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Toggle(true) => "y",
            FieldValue::Toggle(false) => "",
            FieldValue::Choice { options, selected } => options.get(*selected).copied().unwrap_or(""),
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(self.value, FieldValue::Toggle(true))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.value, FieldValue::Text(_))
    }

    /// Set the text value (ignored for non-text fields)
    pub fn set_text(&mut self, value: String) {
        if let FieldValue::Text(s) = &mut self.value {
            *s = value;
        }
    }

    /// Select an option by its value; unknown values are ignored
    pub fn select(&mut self, value: &str) {
        if let FieldValue::Choice { options, selected } = &mut self.value {
            if let Some(idx) = options.iter().position(|o| *o == value) {
                *selected = idx;
            }
        }
    }

    /// Flip a checkbox or advance a select to its next option
    pub fn activate(&mut self) {
        match &mut self.value {
            FieldValue::Text(_) => {}
            FieldValue::Toggle(checked) => *checked = !*checked,
            FieldValue::Choice { options, selected } => {
                if !options.is_empty() {
                    *selected = (*selected + 1) % options.len();
                }
            }
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(s) => s.push(c),
            FieldValue::Toggle(_) | FieldValue::Choice { .. } => {
                if c == ' ' {
                    self.activate();
                }
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
        }
    }

    /// Reset to the blank value: empty text, unchecked, first option
    pub fn clear(&mut self) {
        match &mut self.value {
            FieldValue::Text(s) => s.clear(),
            FieldValue::Toggle(checked) => *checked = false,
            FieldValue::Choice { selected, .. } => *selected = 0,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) if self.is_secret => "*".repeat(s.chars().count()),
            FieldValue::Text(s) => s.clone(),
            FieldValue::Toggle(true) => "[x]".to_string(),
            FieldValue::Toggle(false) => "[ ]".to_string(),
            FieldValue::Choice { .. } => format!("‹ {} ›", self.as_text()),
        }
    }
}
