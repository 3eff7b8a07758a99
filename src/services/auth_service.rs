use std::sync::Arc;

use crate::database::Store;
use crate::dto::account_dto::{LoginForm, RegisterForm};
use crate::dto::form::{FormErrors, Submitted};
use crate::error::Result;
use crate::middleware::auth::Identity;
use crate::models::user::{NewUser, User};
use crate::utils::{crypto, token};

pub const USERNAME_TAKEN: &str = "A user with that username already exists.";
pub const BAD_CREDENTIALS: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    jwt_secret: String,
    token_ttl_minutes: i64,
}

pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, jwt_secret: String, token_ttl_minutes: i64) -> Self {
        Self {
            store,
            jwt_secret,
            token_ttl_minutes,
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Confirms that the token's user still exists. A token for a missing
    /// account is treated as anonymous.
    pub async fn resolve(&self, claimed: Identity) -> Result<Option<Identity>> {
        match self.store.user_by_id(claimed.user_id).await? {
            Some(user) => Ok(Some(Identity {
                user_id: user.id,
                username: user.username,
            })),
            None => {
                tracing::debug!(user_id = claimed.user_id, "token refers to an unknown user");
                Ok(None)
            }
        }
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<Submitted<User>> {
        let (input, mut errors) = match form.clean() {
            Ok(input) => (Some(input), FormErrors::new()),
            Err(errors) => (None, errors),
        };
        if !errors.contains("username")
            && self.store
                .user_by_username(form.username.trim())
                .await?
                .is_some()
        {
            errors.add("username", USERNAME_TAKEN);
        }
        let input = match input {
            Some(input) if errors.is_empty() => input,
            _ => return Ok(Submitted::Invalid(errors)),
        };

        let password_hash = crypto::hash_password(&input.password)?;
        let user = self
            .store
            .insert_user(NewUser {
                username: input.username,
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                password_hash,
            })
            .await?;
        tracing::info!(user_id = user.id, username = %user.username, "user registered");
        Ok(Submitted::Saved(user))
    }

    pub async fn login(&self, form: &LoginForm) -> Result<Submitted<IssuedToken>> {
        if let Err(errors) = form.clean() {
            return Ok(Submitted::Invalid(errors));
        }
        let user = match self.store.user_by_username(form.username.trim()).await? {
            Some(user) if crypto::verify_password(&form.password, &user.password_hash)? => user,
            _ => {
                tracing::info!(username = %form.username, "login rejected");
                let mut errors = FormErrors::new();
                errors.add_non_field(BAD_CREDENTIALS);
                return Ok(Submitted::Invalid(errors));
            }
        };

        let token = token::issue_token(
            &self.jwt_secret,
            user.id,
            &user.username,
            self.token_ttl_minutes,
        )?;
        tracing::info!(user_id = user.id, "login succeeded");
        Ok(Submitted::Saved(IssuedToken {
            token,
            expires_in: self.token_ttl_minutes * 60,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    fn service() -> AuthService {
        AuthService::new(Arc::new(MemoryStore::new()), "secret".into(), 60)
    }

    fn registration(username: &str) -> RegisterForm {
        RegisterForm {
            username: username.into(),
            first_name: "Anna".into(),
            last_name: "K".into(),
            email: "anna@example.com".into(),
            password1: "long enough pw".into(),
            password2: "long enough pw".into(),
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let auth = service();
        let user = match auth.register(&registration("anna")).await.unwrap() {
            Submitted::Saved(user) => user,
            Submitted::Invalid(errors) => panic!("unexpected errors: {:?}", errors),
        };
        assert_ne!(user.password_hash, "long enough pw");

        let good = LoginForm {
            username: "anna".into(),
            password: "long enough pw".into(),
        };
        match auth.login(&good).await.unwrap() {
            Submitted::Saved(issued) => {
                let claims = token::decode_token("secret", &issued.token).unwrap();
                assert_eq!(claims.sub, user.id.to_string());
            }
            Submitted::Invalid(errors) => panic!("unexpected errors: {:?}", errors),
        }

        let bad = LoginForm {
            username: "anna".into(),
            password: "wrong password".into(),
        };
        match auth.login(&bad).await.unwrap() {
            Submitted::Invalid(errors) => assert!(errors.contains("__all__")),
            Submitted::Saved(_) => panic!("wrong password accepted"),
        }
    }

    #[tokio::test]
    async fn tokens_for_unknown_users_resolve_to_nobody() {
        let auth = service();
        let claimed = Identity {
            user_id: 424242,
            username: "ghost".into(),
        };
        assert_eq!(auth.resolve(claimed).await.unwrap(), None);

        let user = match auth.register(&registration("anna")).await.unwrap() {
            Submitted::Saved(user) => user,
            Submitted::Invalid(errors) => panic!("unexpected errors: {:?}", errors),
        };
        let claimed = Identity {
            user_id: user.id,
            username: "stale-name".into(),
        };
        let resolved = auth.resolve(claimed).await.unwrap().unwrap();
        assert_eq!(resolved.username, "anna");
    }

    #[tokio::test]
    async fn duplicate_username_is_a_field_error() {
        let auth = service();
        auth.register(&registration("anna")).await.unwrap();
        match auth.register(&registration("anna")).await.unwrap() {
            Submitted::Invalid(errors) => {
                assert_eq!(errors.get("username").unwrap(), &[USERNAME_TAKEN.to_string()])
            }
            Submitted::Saved(_) => panic!("duplicate username accepted"),
        }
    }
}
