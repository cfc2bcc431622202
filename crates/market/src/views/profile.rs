//! Profile page, with a view mode and an edit mode.

use askama::Template;

use super::{Outcome, ViewContext};
use crate::db::UserRepository;
use crate::error::Result;
use crate::router::Route;

/// Profile page template.
#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub avatar: String,
    pub is_artist: bool,
    pub editing: bool,
}

/// Render the profile page.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails to render.
pub fn render(ctx: &ViewContext<'_>) -> Result<Outcome> {
    let Some(session) = ctx.session else {
        return Ok(Outcome::redirect(Route::Login));
    };
    let Some(user) = UserRepository::new(ctx.db).get_by_id(&session.user_id) else {
        tracing::warn!(user_id = %session.user_id, "Session user no longer exists");
        return Ok(Outcome::redirect(Route::Login));
    };

    Outcome::page(
        "Profile",
        &ProfileTemplate {
            name: user.profile.name,
            email: user.email.into_inner(),
            bio: user.profile.bio,
            avatar: user.profile.avatar,
            is_artist: session.is_artist(),
            editing: ctx.ui.editing_profile,
        },
    )
}
