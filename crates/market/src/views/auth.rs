//! Login and signup pages.

use askama::Template;

use craftify_core::Role;

use super::Outcome;
use crate::error::Result;

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 4;

/// Display name used when signup leaves it blank.
pub const DEFAULT_DISPLAY_NAME: &str = "New Member";

/// Login page template.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate;

/// A role choice on the signup form.
#[derive(Clone)]
pub struct RoleOption {
    pub value: String,
    pub label: &'static str,
}

/// Signup page template.
#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub roles: Vec<RoleOption>,
    pub min_password_len: usize,
}

/// Render the login page.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails to render.
pub fn render_login() -> Result<Outcome> {
    Outcome::page("Log in", &LoginTemplate)
}

/// Render the signup page.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails to render.
pub fn render_signup() -> Result<Outcome> {
    let roles = [(Role::User, "User (buy art)"), (Role::Artist, "Artist (sell art)")]
        .into_iter()
        .map(|(role, label)| RoleOption {
            value: role.to_string(),
            label,
        })
        .collect();

    Outcome::page(
        "Sign up",
        &SignupTemplate {
            roles,
            min_password_len: MIN_PASSWORD_LEN,
        },
    )
}
