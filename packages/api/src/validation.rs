//! # Form validation
//!
//! Each form checks its fields before anything touches storage and reports every
//! failing field at once, keyed by field name, so the UI can show the message next
//! to the input. Only the first problem per field is kept. Messages are in
//! Turkish, like the category names and the rest of the catalog data.
//!
//! | Form | Rules |
//! |------|-------|
//! | [`RegisterForm`] | username required; email required and well-formed; password required and at least `min_password_len` long; confirmation equal to password |
//! | [`LoginForm`] | email required and well-formed; password required |
//! | [`ChangePasswordForm`] | current password required; new password required and at least `min_password_len` long; confirmation equal to new password |
//! | [`validate_recipe`] | title, ingredients, instructions and cooking time required |

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tarifhane_store::config::AccountsConfig;
use tarifhane_store::RecipeDraft;

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless the field already has one.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `local@domain.tld` with no whitespace and a dot inside the domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty() && !host.ends_with('.'),
        None => false,
    }
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if is_blank(email) {
        errors.add("email", "E-posta zorunlu");
    } else if !is_valid_email(email) {
        errors.add("email", "Geçersiz e-posta");
    }
}

/// Wording for a password field and its confirmation.
struct PasswordMessages {
    required: &'static str,
    too_short: fn(usize) -> String,
    confirmation_required: &'static str,
}

fn password_too_short(min: usize) -> String {
    format!("En az {min} karakter")
}

fn new_password_too_short(min: usize) -> String {
    format!("Yeni şifre en az {min} karakter olmalı")
}

const PASSWORD: PasswordMessages = PasswordMessages {
    required: "Şifre zorunlu",
    too_short: password_too_short,
    confirmation_required: "Şifre tekrarı zorunlu",
};

const NEW_PASSWORD: PasswordMessages = PasswordMessages {
    required: "Yeni şifre zorunlu",
    too_short: new_password_too_short,
    confirmation_required: "Yeni şifre tekrarı zorunlu",
};

fn check_new_password(
    errors: &mut ValidationErrors,
    field: &'static str,
    password: &str,
    rules: &AccountsConfig,
    messages: &PasswordMessages,
) {
    if password.is_empty() {
        errors.add(field, messages.required);
    } else if password.chars().count() < rules.min_password_len {
        errors.add(field, (messages.too_short)(rules.min_password_len));
    }
}

fn check_confirmation(
    errors: &mut ValidationErrors,
    field: &'static str,
    password: &str,
    confirmation: &str,
    messages: &PasswordMessages,
) {
    if confirmation.is_empty() {
        errors.add(field, messages.confirmation_required);
    } else if confirmation != password {
        errors.add(field, "Şifreler eşleşmiyor");
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self, rules: &AccountsConfig) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if is_blank(&self.username) {
            errors.add("username", "Kullanıcı adı zorunlu");
        }
        check_email(&mut errors, &self.email);
        check_new_password(&mut errors, "password", &self.password, rules, &PASSWORD);
        check_confirmation(
            &mut errors,
            "confirmPassword",
            &self.password,
            &self.confirm_password,
            &PASSWORD,
        );
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_email(&mut errors, &self.email);
        if self.password.is_empty() {
            errors.add("password", PASSWORD.required);
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ChangePasswordForm {
    pub fn validate(&self, rules: &AccountsConfig) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.current_password.is_empty() {
            errors.add("currentPassword", "Mevcut şifre zorunlu");
        }
        check_new_password(
            &mut errors,
            "newPassword",
            &self.new_password,
            rules,
            &NEW_PASSWORD,
        );
        check_confirmation(
            &mut errors,
            "confirmPassword",
            &self.new_password,
            &self.confirm_password,
            &NEW_PASSWORD,
        );
        errors.into_result()
    }
}

/// Required-field checks for a recipe submission or edit.
pub fn validate_recipe(draft: &RecipeDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let required = [
        ("title", &draft.title, "Tarif adı zorunlu"),
        ("ingredients", &draft.ingredients, "Malzemeler zorunlu"),
        ("instructions", &draft.instructions, "Yapılışı zorunlu"),
        ("cookingTime", &draft.cooking_time, "Pişirme süresi zorunlu"),
    ];
    for (field, value, message) in required {
        if is_blank(value) {
            errors.add(field, message);
        }
    }
    errors.into_result()
}
