//! Rich-text body contract
//!
//! Forms only read the body, replace it, and check it for emptiness; the
//! markdown itself is never interpreted here.

use super::field::FormField;

pub trait RichTextEditor {
    fn value(&self) -> &str;
    fn set_value(&mut self, value: String);

    fn is_blank(&self) -> bool {
        self.value().trim().is_empty()
    }
}

/// The in-terminal body field acts as the editor
impl RichTextEditor for FormField {
    fn value(&self) -> &str {
        self.as_text()
    }

    fn set_value(&mut self, value: String) {
        self.set_text(value);
    }
}

/// Name the body is submitted under by every content form
pub const BODY_FIELD: &str = "editor";

/// Multiline markdown body field
pub fn body_field(label: &str, content: String) -> FormField {
    FormField::text_with_value(BODY_FIELD, label, content, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_body_is_blank() {
        let mut body = body_field("Content (Markdown)", String::new());
        assert!(body.is_blank());
        body.set_value("  \n\t".to_string());
        assert!(body.is_blank());
        body.set_value("# Title".to_string());
        assert!(!body.is_blank());
        assert_eq!(body.value(), "# Title");
    }
}
