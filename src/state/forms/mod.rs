//! Form domain layer
//!
//! Type-safe form handling for the backstage create/edit views: field values,
//! validator chains, the bounded list editor and submission gating.

mod editor;
mod error;
mod field;
mod form_state;
mod guard;
mod list_editor;
pub mod rules;
mod snapshot;
mod validator;

pub use error::FormError;
pub use field::FormField;
pub use form_state::{
    ChangelogForm, EditTarget, Form, FormKind, FormState, PasswordForm, PostForm,
    ProjectForm, SocialLinksForm,
};
pub use guard::{classify_key, gate_submission, KeyIntent};
pub use list_editor::DEFAULT_MAX_ENTRIES;
pub use snapshot::FormSnapshot;
pub use validator::run_chain;
