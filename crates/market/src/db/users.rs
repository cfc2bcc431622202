//! User repository.
//!
//! Email uniqueness is enforced here, ignoring letter case, whenever an
//! account is created or its email changes.

use secrecy::{ExposeSecret, SecretString};

use craftify_core::{Email, Role, UserId};

use super::Db;
use crate::error::{AppError, Result};
use crate::models::{Profile, User};

/// Input for creating an account.
#[derive(Debug)]
pub struct NewUser {
    pub email: Email,
    pub password: SecretString,
    pub role: Role,
    pub profile: Profile,
}

/// Repository for user operations.
pub struct UserRepository<'a> {
    db: &'a Db,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// Get a user by their ID.
    #[must_use]
    pub fn get_by_id(&self, id: &UserId) -> Option<User> {
        self.db.users().into_iter().find(|u| &u.id == id)
    }

    /// Get a user by email, ignoring case.
    #[must_use]
    pub fn get_by_email(&self, email: &str) -> Option<User> {
        let wanted = email.trim();
        self.db
            .users()
            .into_iter()
            .find(|u| u.email.as_str().eq_ignore_ascii_case(wanted))
    }

    /// Check an email/password pair.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidCredentials` if no account matches.
    pub fn authenticate(&self, email: &str, password: &SecretString) -> Result<User> {
        self.get_by_email(email)
            .filter(|u| u.password == password.expose_secret())
            .ok_or(AppError::InvalidCredentials)
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns `AppError::EmailTaken` if the email is already registered.
    pub fn create(&self, new_user: NewUser) -> Result<User> {
        let mut users = self.db.users();
        if users.iter().any(|u| new_user.email.matches(u.email.as_str())) {
            return Err(AppError::EmailTaken);
        }

        let user = User {
            id: UserId::generate(),
            email: new_user.email,
            password: new_user.password.expose_secret().to_owned(),
            role: new_user.role,
            profile: new_user.profile,
        };
        users.push(user.clone());
        self.db.set_users(&users);

        tracing::info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Update display name and bio, keeping everything else.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the user doesn't exist.
    pub fn save_profile(&self, id: &UserId, name: &str, bio: &str) -> Result<User> {
        self.modify(id, |user| {
            user.profile.name = name.to_owned();
            user.profile.bio = bio.to_owned();
            Ok(())
        })
    }

    /// Replace email and profile.
    ///
    /// # Errors
    ///
    /// Returns `AppError::EmailTaken` if another account already uses the new
    /// email, or `AppError::NotFound` if the user doesn't exist.
    pub fn update_account(&self, id: &UserId, email: Email, profile: Profile) -> Result<User> {
        let taken = self
            .db
            .users()
            .iter()
            .any(|u| &u.id != id && email.matches(u.email.as_str()));
        if taken {
            return Err(AppError::EmailTaken);
        }

        self.modify(id, move |user| {
            user.email = email;
            user.profile = profile;
            Ok(())
        })
    }

    /// Read-modify-write a single user.
    fn modify<F>(&self, id: &UserId, change: F) -> Result<User>
    where
        F: FnOnce(&mut User) -> Result<()>,
    {
        let mut users = self.db.users();
        let user = users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| AppError::NotFound(format!("user {id}")))?;
        change(user)?;
        let updated = user.clone();
        self.db.set_users(&users);
        Ok(updated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            email: Email::parse(email).unwrap(),
            password: SecretString::from("pass1234"),
            role,
            profile: Profile {
                name: "Maker".to_string(),
                ..Profile::default()
            },
        }
    }

    #[test]
    fn test_create_and_lookup() {
        let db = Db::in_memory();
        let repo = UserRepository::new(&db);
        let user = repo.create(new_user("maker@example.com", Role::Artist)).unwrap();

        assert_eq!(repo.get_by_id(&user.id).unwrap().email, user.email);
        assert!(repo.get_by_email("MAKER@example.com").is_some());
        assert!(repo.get_by_email("nobody@example.com").is_none());
    }

    #[test]
    fn test_duplicate_email_ignores_case() {
        let db = Db::in_memory();
        let repo = UserRepository::new(&db);
        repo.create(new_user("maker@example.com", Role::Artist)).unwrap();

        let err = repo
            .create(new_user("Maker@Example.com", Role::User))
            .unwrap_err();
        assert!(matches!(err, AppError::EmailTaken));
        assert_eq!(db.users().len(), 1);
    }

    #[test]
    fn test_authenticate() {
        let db = Db::in_memory();
        let repo = UserRepository::new(&db);
        let user = repo.create(new_user("buyer@example.com", Role::User)).unwrap();

        let found = repo
            .authenticate("Buyer@example.com", &SecretString::from("pass1234"))
            .unwrap();
        assert_eq!(found.id, user.id);

        assert!(matches!(
            repo.authenticate("buyer@example.com", &SecretString::from("wrong")),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            repo.authenticate("ghost@example.com", &SecretString::from("pass1234")),
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_save_profile_keeps_avatar() {
        let db = Db::in_memory();
        let repo = UserRepository::new(&db);
        let mut input = new_user("maker@example.com", Role::Artist);
        input.profile.avatar = "data:image/png;base64,AAAA".to_string();
        let user = repo.create(input).unwrap();

        let updated = repo.save_profile(&user.id, "Meera", "Potter").unwrap();
        assert_eq!(updated.profile.name, "Meera");
        assert_eq!(updated.profile.bio, "Potter");
        assert_eq!(updated.profile.avatar, "data:image/png;base64,AAAA");
        assert_eq!(repo.get_by_id(&user.id).unwrap().profile.name, "Meera");
    }

    #[test]
    fn test_update_account_rejects_taken_email() {
        let db = Db::in_memory();
        let repo = UserRepository::new(&db);
        let first = repo.create(new_user("first@example.com", Role::User)).unwrap();
        repo.create(new_user("second@example.com", Role::User)).unwrap();

        let err = repo
            .update_account(
                &first.id,
                Email::parse("SECOND@example.com").unwrap(),
                Profile::default(),
            )
            .unwrap_err();
        assert!(matches!(err, AppError::EmailTaken));
        assert_eq!(
            repo.get_by_id(&first.id).unwrap().email.as_str(),
            "first@example.com"
        );
    }

    #[test]
    fn test_update_account_allows_own_email() {
        let db = Db::in_memory();
        let repo = UserRepository::new(&db);
        let user = repo.create(new_user("me@example.com", Role::User)).unwrap();

        let updated = repo
            .update_account(
                &user.id,
                Email::parse("me@example.com").unwrap(),
                Profile {
                    name: "New Name".to_string(),
                    ..Profile::default()
                },
            )
            .unwrap();
        assert_eq!(updated.profile.name, "New Name");
    }

    #[test]
    fn test_modify_missing_user() {
        let db = Db::in_memory();
        let repo = UserRepository::new(&db);
        let err = repo
            .save_profile(&UserId::new("usr_missing"), "x", "y")
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
