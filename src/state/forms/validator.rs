//! Field validation
//!
//! Each [`FieldKind`] maps to one stateless predicate. Forms declare an
//! ordered list of [`Rule`]s; [`run_chain`] evaluates them in order and stops
//! at the first failure so the user only ever sees one message.

use super::error::ValidationError;
use super::snapshot::FormSnapshot;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email pattern"));

static USERNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$").expect("valid username pattern")
});

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug pattern"));

static POST_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[\x{4e00}-\x{9fa5}a-zA-Z0-9\s\-_.]+(,\s*[\x{4e00}-\x{9fa5}a-zA-Z0-9\s\-_.]+)*$",
    )
    .expect("valid post tag pattern")
});

static PLAIN_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\x{4e00}-\x{9fa5}a-zA-Z0-9\s]+(,\s*[\x{4e00}-\x{9fa5}a-zA-Z0-9\s]+)*$")
        .expect("valid tag pattern")
});

static IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,6})([/0-9A-Za-z_ .-]*)/?$")
        .expect("valid image url pattern")
});

// Searched, not anchored.
static LINK_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_+.~#?&/=]*)",
    )
    .expect("valid link url pattern")
});

/// Which URL pattern a field uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlRule {
    /// Loose host-and-path pattern used for images, scheme optional
    Image,
    /// Scheme-required pattern used for links
    Link,
}

/// Which characters a tag list may contain besides letters, digits and spaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagRule {
    /// Post tags also permit `-`, `_` and `.`
    Post,
    /// Project and changelog tags
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Url(UrlRule),
    TagList(TagRule),
    Slug,
    Password,
    Email,
    Username,
    /// Must not start or end with `-`
    NoEdgeHyphen,
    Checkbox,
}

/// Static description of one validated field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Shown when a required field is empty
    pub missing: &'static str,
    /// Shown when a present value does not match the kind's pattern
    pub invalid: &'static str,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind, missing: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            missing,
            invalid: missing,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind, invalid: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            missing: "",
            invalid,
        }
    }

    pub const fn invalid_as(mut self, invalid: &'static str) -> Self {
        self.invalid = invalid;
        self
    }
}

/// One step of a form's validation chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Field(FieldSpec),
    /// Every entry of a list editor role, e.g. `url-1`, `url-2`, ...
    ///
    /// A blank first entry fails with `first_required` when it is set.
    /// Later blank entries are skipped when `skip_blank` is set and fail
    /// as invalid otherwise. The invalid message is suffixed with the
    /// entry's order.
    Entries {
        role: &'static str,
        kind: FieldKind,
        first_required: Option<&'static str>,
        skip_blank: bool,
        invalid: &'static str,
    },
    /// `confirm` must equal `field` exactly
    Matches {
        field: &'static str,
        confirm: &'static str,
        message: &'static str,
    },
}

/// Password policy: at least 8 characters, one lowercase and one uppercase letter
pub fn is_valid_password(value: &str) -> bool {
    value.chars().filter(|c| *c != '\n').count() >= 8
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

pub fn is_valid_slug(value: &str) -> bool {
    SLUG.is_match(value)
}

pub fn is_valid_username(value: &str) -> bool {
    USERNAME.is_match(value)
}

pub fn is_valid_tag_list(value: &str, rule: TagRule) -> bool {
    match rule {
        TagRule::Post => POST_TAGS.is_match(value),
        TagRule::Plain => PLAIN_TAGS.is_match(value),
    }
}

pub fn is_valid_url(value: &str, rule: UrlRule) -> bool {
    match rule {
        UrlRule::Image => IMAGE_URL.is_match(value),
        UrlRule::Link => LINK_URL.is_match(value),
    }
}

/// Pattern check for a non-empty value
fn matches_kind(kind: FieldKind, value: &str) -> bool {
    match kind {
        FieldKind::Text => true,
        FieldKind::Url(rule) => is_valid_url(value, rule),
        FieldKind::TagList(rule) => is_valid_tag_list(value, rule),
        FieldKind::Slug => is_valid_slug(value),
        FieldKind::Password => is_valid_password(value),
        FieldKind::Email => is_valid_email(value),
        FieldKind::Username => is_valid_username(value),
        FieldKind::NoEdgeHyphen => !value.starts_with('-') && !value.ends_with('-'),
        FieldKind::Checkbox => value == "y",
    }
}

/// Validate one field value against its spec
pub fn validate_field(spec: &FieldSpec, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return if spec.required {
            Err(ValidationError::new(spec.name, spec.missing))
        } else {
            Ok(())
        };
    }

    if matches_kind(spec.kind, value) {
        Ok(())
    } else {
        Err(ValidationError::new(spec.name, spec.invalid))
    }
}

fn validate_entries(
    snapshot: &FormSnapshot,
    role: &str,
    kind: FieldKind,
    first_required: Option<&str>,
    skip_blank: bool,
    invalid: &str,
) -> Result<(), ValidationError> {
    let entries = snapshot.entries(role);

    if let Some(message) = first_required {
        let first_blank = entries
            .first()
            .map(|(_, value)| value.trim().is_empty())
            .unwrap_or(true);
        if first_blank {
            return Err(ValidationError::new(format!("{role}-1"), message));
        }
    }

    for (order, value) in entries {
        let value = value.trim();
        if value.is_empty() && skip_blank {
            continue;
        }
        if !matches_kind(kind, value) {
            return Err(ValidationError::new(
                format!("{role}-{order}"),
                format!("{invalid} {order}"),
            ));
        }
    }
    Ok(())
}

/// Evaluate one rule against a snapshot
pub fn check_rule(rule: &Rule, snapshot: &FormSnapshot) -> Result<(), ValidationError> {
    match rule {
        Rule::Field(spec) => validate_field(spec, snapshot.get(spec.name)),
        Rule::Entries {
            role,
            kind,
            first_required,
            skip_blank,
            invalid,
        } => validate_entries(snapshot, role, *kind, *first_required, *skip_blank, invalid),
        Rule::Matches {
            field,
            confirm,
            message,
        } => {
            if snapshot.get(field) == snapshot.get(confirm) {
                Ok(())
            } else {
                Err(ValidationError::new(*confirm, *message))
            }
        }
    }
}

/// Run a form's rules in declared order, stopping at the first failure
pub fn run_chain(rules: &[Rule], snapshot: &FormSnapshot) -> Result<(), ValidationError> {
    for rule in rules {
        if let Err(err) = check_rule(rule, snapshot) {
            tracing::debug!(field = %err.field, "validation failed");
            return Err(err);
        }
    }
    Ok(())
}
