//! Validation chains for every backstage form

use super::validator::{FieldKind, FieldSpec, Rule, TagRule, UrlRule};

const SLUG_INVALID: &str = "Your custom slug is invalid. Use only lowercase letters, numbers, and hyphens. Must start and end with a letter or number.";

const POST_TITLE: Rule = Rule::Field(FieldSpec::required(
    "title",
    FieldKind::Text,
    "You must enter the title for the post.",
));

const POST_SUBTITLE: Rule = Rule::Field(FieldSpec::required(
    "subtitle",
    FieldKind::Text,
    "Add a short description as a subtitle for this post.",
));

const POST_TAGS: Rule = Rule::Field(
    FieldSpec::required(
        "tags",
        FieldKind::TagList(TagRule::Post),
        "You must add one tag to the post at least.",
    )
    .invalid_as("You must separate tags with a comma (',')."),
);

const POST_SLUG: Rule = Rule::Field(FieldSpec::optional("custom_slug", FieldKind::Slug, SLUG_INVALID));

const POST_BODY: Rule = Rule::Field(FieldSpec::required(
    "editor",
    FieldKind::Text,
    "Your post cannot be empty!",
));

const COVER_INVALID: &str = "Please enter a valid URL for the cover image.";

/// New posts take any absolute http(s) link as the cover
pub const NEW_POST: &[Rule] = &[
    POST_TITLE,
    POST_SUBTITLE,
    POST_TAGS,
    Rule::Field(FieldSpec::optional("cover_url", FieldKind::Url(UrlRule::Link), COVER_INVALID)),
    POST_SLUG,
    POST_BODY,
];

/// Edited posts check the cover with the image pattern, scheme optional
pub const EDIT_POST: &[Rule] = &[
    POST_TITLE,
    POST_SUBTITLE,
    POST_TAGS,
    Rule::Field(FieldSpec::optional("cover_url", FieldKind::Url(UrlRule::Image), COVER_INVALID)),
    POST_SLUG,
    POST_BODY,
];

pub const NEW_PROJECT: &[Rule] = &[
    Rule::Field(FieldSpec::required(
        "title",
        FieldKind::Text,
        "You must enter the title for the project.",
    )),
    Rule::Field(FieldSpec::required(
        "desc",
        FieldKind::Text,
        "You must add a short description for the project.",
    )),
    Rule::Field(
        FieldSpec::required(
            "tags",
            FieldKind::TagList(TagRule::Plain),
            "You must add at least one tag to the project.",
        )
        .invalid_as("Tags must be separated by a comma (',')."),
    ),
    Rule::Entries {
        role: "url",
        kind: FieldKind::Url(UrlRule::Link),
        first_required: Some("You must insert at least 1 image for the project."),
        skip_blank: true,
        invalid: "Invalid URL for image",
    },
    Rule::Field(FieldSpec::optional("custom_slug", FieldKind::Slug, SLUG_INVALID)),
    Rule::Field(FieldSpec::required(
        "editor",
        FieldKind::Text,
        "Write something for your project!",
    )),
];

pub const EDIT_PROJECT: &[Rule] = &[
    Rule::Field(FieldSpec::required(
        "title",
        FieldKind::Text,
        "You must enter the title for the project.",
    )),
    Rule::Field(FieldSpec::required(
        "desc",
        FieldKind::Text,
        "You must add a short description for the project.",
    )),
    Rule::Field(
        FieldSpec::required(
            "tags",
            FieldKind::TagList(TagRule::Plain),
            "You must add at least one tag to the project.",
        )
        .invalid_as("Tags must be separated by a comma (',')."),
    ),
    Rule::Field(
        FieldSpec::required(
            "custom_slug",
            FieldKind::Slug,
            "Your custom slug is not a URL-friendly string.",
        ),
    ),
    Rule::Field(FieldSpec::required(
        "editor",
        FieldKind::Text,
        "Write something for your project!",
    )),
    Rule::Entries {
        role: "url",
        kind: FieldKind::Url(UrlRule::Image),
        first_required: Some("You must insert an image for the project."),
        skip_blank: false,
        invalid: "Invalid url for image",
    },
];

pub const CHANGELOG: &[Rule] = &[
    Rule::Field(FieldSpec::required(
        "title",
        FieldKind::Text,
        "You must enter the title for the changelog.",
    )),
    Rule::Field(FieldSpec::required(
        "date",
        FieldKind::Text,
        "You must enter the date for the changelog.",
    )),
    Rule::Field(FieldSpec::required(
        "category",
        FieldKind::Text,
        "You must select a category for the changelog.",
    )),
    Rule::Field(
        FieldSpec::required(
            "tags",
            FieldKind::TagList(TagRule::Plain),
            "You must add one tag to the changelog at least.",
        )
        .invalid_as("You must separate tags with a comma (',')."),
    ),
    Rule::Field(FieldSpec::optional(
        "link",
        FieldKind::Url(UrlRule::Link),
        "Please enter a valid URL.",
    )),
    Rule::Field(FieldSpec::required(
        "editor",
        FieldKind::Text,
        "The changelog content cannot be empty!",
    )),
];

pub const PASSWORD_CHANGE: &[Rule] = &[
    Rule::Field(FieldSpec::required(
        "new_pw",
        FieldKind::Password,
        "Invalid new password. It should be at least 8 characters long and contain both uppercases and lowercases.",
    )),
    Rule::Matches {
        field: "new_pw",
        confirm: "new_pw_repeat",
        message: "Confirmation of the new password failed.",
    },
];

pub const SOCIAL_LINKS: &[Rule] = &[Rule::Entries {
    role: "url",
    kind: FieldKind::Url(UrlRule::Link),
    first_required: None,
    skip_blank: true,
    invalid: "Invalid URL for social link",
}];

pub const REGISTRATION_STEP1: &[Rule] = &[
    Rule::Field(FieldSpec::required(
        "email",
        FieldKind::Text,
        "Enter email and password to continue.",
    )),
    Rule::Field(FieldSpec::required(
        "password",
        FieldKind::Text,
        "Enter email and password to continue.",
    )),
    Rule::Field(FieldSpec::required(
        "email",
        FieldKind::Email,
        "Enter a valid email address.",
    )),
    Rule::Field(FieldSpec::required(
        "password",
        FieldKind::Password,
        "Password must be 8 characters long and contain both uppercase and lowercase letters.",
    )),
];

pub const REGISTRATION_STEP2: &[Rule] = &[
    Rule::Field(FieldSpec::required(
        "username",
        FieldKind::Text,
        "Enter username and blog name to continue.",
    )),
    Rule::Field(FieldSpec::required(
        "blogname",
        FieldKind::Text,
        "Enter username and blog name to continue.",
    )),
    Rule::Field(FieldSpec::required(
        "username",
        FieldKind::NoEdgeHyphen,
        "Username cannot begin or end with a hyphen.",
    )),
    Rule::Field(FieldSpec::required(
        "username",
        FieldKind::Username,
        "Invalid username. Please use only letters (lowercase), numbers, and \"-\".",
    )),
    Rule::Field(FieldSpec::required(
        "terms",
        FieldKind::Checkbox,
        "You must read the terms to continue.",
    )),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::validator::run_chain;
    use crate::state::FormSnapshot;
    use pretty_assertions::assert_eq;

    fn valid_post() -> FormSnapshot {
        FormSnapshot::new()
            .with("title", "Hello")
            .with("subtitle", "World")
            .with("tags", "rust, web-dev")
            .with("cover_url", "")
            .with("custom_slug", "")
            .with("editor", "# Body")
    }

    #[test]
    fn test_post_chain_accepts_valid_post() {
        assert!(run_chain(NEW_POST, &valid_post()).is_ok());
    }

    #[test]
    fn test_post_chain_reports_body_last() {
        let mut post = valid_post();
        post.set("editor", "   ");
        assert_eq!(
            run_chain(NEW_POST, &post).unwrap_err().message,
            "Your post cannot be empty!"
        );
    }

    #[test]
    fn test_post_chain_cover_url_optional_but_checked() {
        let mut post = valid_post();
        post.set("cover_url", "bad url");
        assert_eq!(run_chain(NEW_POST, &post).unwrap_err().field, "cover_url");
    }

    #[test]
    fn test_new_post_cover_needs_scheme() {
        let mut post = valid_post();
        post.set("cover_url", "example.com/cover.png");
        assert_eq!(
            run_chain(NEW_POST, &post).unwrap_err().message,
            "Please enter a valid URL for the cover image."
        );
        post.set("cover_url", "https://cdn.example.com/cover.png?w=800");
        assert!(run_chain(NEW_POST, &post).is_ok());
    }

    #[test]
    fn test_edit_post_cover_uses_image_pattern() {
        let mut post = valid_post();
        post.set("cover_url", "example.com/cover.png");
        assert!(run_chain(EDIT_POST, &post).is_ok());
        post.set("cover_url", "https://cdn.example.com/cover.png?w=800");
        assert_eq!(run_chain(EDIT_POST, &post).unwrap_err().field, "cover_url");
    }

    #[test]
    fn test_edit_project_rejects_blank_added_image() {
        let snapshot = FormSnapshot::new()
            .with("title", "t")
            .with("desc", "d")
            .with("tags", "rust")
            .with("custom_slug", "proj")
            .with("editor", "body")
            .with("url-1", "example.com/a.png")
            .with("url-2", "");
        let err = run_chain(EDIT_PROJECT, &snapshot).unwrap_err();
        assert_eq!(err.message, "Invalid url for image 2");
        assert_eq!(err.field, "url-2");
    }

    #[test]
    fn test_new_project_skips_blank_added_image() {
        let snapshot = FormSnapshot::new()
            .with("title", "t")
            .with("desc", "d")
            .with("tags", "rust")
            .with("url-1", "https://example.com/a.png")
            .with("url-2", "")
            .with("editor", "body");
        assert!(run_chain(NEW_PROJECT, &snapshot).is_ok());
    }

    #[test]
    fn test_edit_project_requires_slug() {
        let snapshot = FormSnapshot::new()
            .with("title", "t")
            .with("desc", "d")
            .with("tags", "rust")
            .with("custom_slug", "");
        assert_eq!(
            run_chain(EDIT_PROJECT, &snapshot).unwrap_err().message,
            "Your custom slug is not a URL-friendly string."
        );
    }

    #[test]
    fn test_changelog_rejects_post_style_tags() {
        let snapshot = FormSnapshot::new()
            .with("title", "t")
            .with("date", "01/02/2024")
            .with("category", "feature")
            .with("tags", "web-dev");
        assert_eq!(run_chain(CHANGELOG, &snapshot).unwrap_err().field, "tags");
    }

    #[test]
    fn test_registration_step2_hyphen_message() {
        let snapshot = FormSnapshot::new()
            .with("username", "-abc")
            .with("blogname", "Blog")
            .with("terms", "y");
        assert_eq!(
            run_chain(REGISTRATION_STEP2, &snapshot).unwrap_err().message,
            "Username cannot begin or end with a hyphen."
        );
    }

    #[test]
    fn test_registration_step1_empty_before_pattern() {
        let snapshot = FormSnapshot::new().with("email", "").with("password", "x");
        assert_eq!(
            run_chain(REGISTRATION_STEP1, &snapshot).unwrap_err().message,
            "Enter email and password to continue."
        );
    }
}
