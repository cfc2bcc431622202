//! Account commands: login, signup, logout and profile edits.
//!
//! # Usage
//!
//! ```bash
//! craftify signup -e maker@example.com -p secret -r artist -n "Meera"
//! craftify login -e maker@example.com -p secret
//! craftify artist-profile -n "Meera" --bio "Madhubani painter"
//! craftify profile edit --bio "Painter from Bihar" --avatar me.png
//! craftify logout
//! ```

use std::path::PathBuf;

use secrecy::SecretString;

use craftify_core::Role;
use craftify_market::app::{Action, ProfileForm, SignupForm};
use craftify_market::db::UserRepository;
use craftify_market::media;

use super::{CliError, act, open_app, show, visit};

/// Signup arguments.
pub struct Signup {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub name: String,
    pub bio: String,
    pub avatar: Option<PathBuf>,
}

/// Profile fields to change.
pub struct ProfileEdit {
    pub name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<PathBuf>,
}

/// Log in.
///
/// # Errors
///
/// Returns `CliError` if the store cannot be opened.
pub fn login(data_dir: Option<PathBuf>, email: String, password: String) -> Result<(), CliError> {
    let mut app = open_app(data_dir)?;
    visit(&mut app, "#/login");
    show(&act(
        &mut app,
        Action::Login {
            email,
            password: SecretString::from(password),
        },
    ));
    Ok(())
}

/// Create an account.
///
/// # Errors
///
/// Returns `CliError` if the store cannot be opened or the avatar file
/// cannot be read.
pub async fn signup(data_dir: Option<PathBuf>, args: Signup) -> Result<(), CliError> {
    let avatar = media::optional_upload(args.avatar.as_deref()).await?;

    let mut app = open_app(data_dir)?;
    visit(&mut app, "#/signup");
    show(&act(
        &mut app,
        Action::Signup(SignupForm {
            role: args.role,
            email: args.email,
            password: SecretString::from(args.password),
            name: args.name,
            bio: args.bio,
            avatar,
        }),
    ));
    Ok(())
}

/// Log out.
///
/// # Errors
///
/// Returns `CliError` if the store cannot be opened.
pub fn logout(data_dir: Option<PathBuf>) -> Result<(), CliError> {
    let mut app = open_app(data_dir)?;
    show(&act(&mut app, Action::Logout));
    Ok(())
}

/// Save the artist name and bio from the dashboard.
///
/// # Errors
///
/// Returns `CliError` if the store cannot be opened.
pub fn artist_profile(data_dir: Option<PathBuf>, name: String, bio: String) -> Result<(), CliError> {
    let mut app = open_app(data_dir)?;
    visit(&mut app, "#/artist");
    show(&act(&mut app, Action::SaveArtistProfile { name, bio }));
    Ok(())
}

/// Show the profile page.
///
/// # Errors
///
/// Returns `CliError` if the store cannot be opened.
pub fn show_profile(data_dir: Option<PathBuf>) -> Result<(), CliError> {
    let mut app = open_app(data_dir)?;
    show(&visit(&mut app, "#/profile"));
    Ok(())
}

/// Edit the profile, keeping omitted fields.
///
/// # Errors
///
/// Returns `CliError` if the store cannot be opened or the avatar file
/// cannot be read.
pub async fn edit_profile(data_dir: Option<PathBuf>, edit: ProfileEdit) -> Result<(), CliError> {
    let avatar = match edit.avatar.as_deref() {
        Some(path) => Some(media::file_to_data_url(path).await?),
        None => None,
    };

    let mut app = open_app(data_dir)?;
    visit(&mut app, "#/profile");
    act(&mut app, Action::BeginProfileEdit);

    let current = app
        .db()
        .session()
        .and_then(|s| UserRepository::new(app.db()).get_by_id(&s.user_id));
    let (name, email, bio) = current.map_or_else(Default::default, |user| {
        (
            user.profile.name,
            user.email.into_inner(),
            user.profile.bio,
        )
    });

    show(&act(
        &mut app,
        Action::SaveProfile(ProfileForm {
            name: edit.name.unwrap_or(name),
            email: edit.email.unwrap_or(email),
            bio: edit.bio.unwrap_or(bio),
            avatar,
        }),
    ));
    Ok(())
}
