use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

const INVALID_EMAIL: &str = "Invalid Email";

/// Sign-up form as posted by the browser. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SignupForm {
    #[serde(default)]
    #[validate(length(min = 3, message = "Name must be at least 3 characters long"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Invalid Email"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,

    #[serde(default, rename = "passwordConfirm")]
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password_confirm: String,
}

impl SignupForm {
    /// Name and email with surrounding whitespace removed; passwords untouched.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            password_confirm: self.password_confirm.clone(),
        }
    }
}

/// One failed rule, tied to the form field that broke it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Checks every sign-up rule and returns all failures in form order.
/// An empty list means the form is acceptable.
pub fn validate_signup(form: &SignupForm) -> Vec<FieldError> {
    let form = form.trimmed();
    let mut errors = Vec::new();

    if !is_alphanumeric(&form.name) {
        errors.push(FieldError::new(
            "name",
            "Name must only contain letters and numbers",
        ));
    }

    let failed = form.validate().err();

    // password_confirm may be keyed by either its Rust or form name
    for (field, keys) in [
        ("name", &["name"][..]),
        ("email", &["email"][..]),
        ("password", &["password"][..]),
        ("passwordConfirm", &["password_confirm", "passwordConfirm"][..]),
    ] {
        let mut messages = messages_for(failed.as_ref(), keys);

        if field == "email" && messages.is_empty() && !has_top_level_domain(&form.email) {
            messages.push(INVALID_EMAIL.to_string());
        }

        errors.extend(
            messages
                .into_iter()
                .map(|message| FieldError::new(field, message)),
        );
    }

    errors
}

/// The domain must end in a label of two or more letters (or a punycode `xn--` label),
/// so addresses like `a@localhost` or `a@host.1` are refused.
fn has_top_level_domain(email: &str) -> bool {
    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    let tld = tld.to_ascii_lowercase();
    let tld_ok = if let Some(rest) = tld.strip_prefix("xn--") {
        !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    } else {
        tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic)
    };

    !host.is_empty() && tld_ok
}

fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric())
}

fn messages_for(errors: Option<&ValidationErrors>, keys: &[&str]) -> Vec<String> {
    let Some(errors) = errors else {
        return Vec::new();
    };
    let fields = errors.field_errors();

    keys.iter()
        .filter_map(|key| fields.get(*key))
        .flat_map(|failures| failures.iter())
        .map(|failure| match &failure.message {
            Some(message) => message.to_string(),
            None => failure.code.to_string(),
        })
        .collect()
}
