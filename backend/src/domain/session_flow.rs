//! Login and logout use-cases.
//!
//! Both operations mutate the session user id that [`super::SessionGuard`]
//! reads on later requests, and both answer with a [`Navigation`] rather than
//! a transport response.

use tracing::info;

use super::ports::{LoginService, SessionStore};
use super::{Error, FlashMessage, LoginCredentials, Navigation, RouteTarget};

/// Check submitted credentials and establish a session on success.
///
/// Blank fields, an unknown email, and a wrong secret all produce the same
/// form re-render with the same danger flash. The session is only written on
/// success.
///
/// # Errors
/// Propagates store failures from `login` and session write failures.
pub async fn attempt_login<S>(
    login: &dyn LoginService,
    session: &S,
    email: &str,
    password: &str,
) -> Result<Navigation, Error>
where
    S: SessionStore + ?Sized,
{
    let rejected = || Navigation::RenderForm {
        email: email.to_owned(),
        flash: FlashMessage::invalid_credentials(),
    };

    let Ok(credentials) = LoginCredentials::try_from_parts(email, password) else {
        return Ok(rejected());
    };

    match login.authenticate(&credentials).await? {
        Some(user) => {
            session.persist_user(user.id())?;
            info!(user_id = %user.id(), "login succeeded");
            Ok(Navigation::redirect(RouteTarget::Root, FlashMessage::logged_in()))
        }
        None => Ok(rejected()),
    }
}

/// Clear the session user id. Idempotent.
pub fn logout<S>(session: &S) -> Navigation
where
    S: SessionStore + ?Sized,
{
    session.forget_user();
    Navigation::redirect(RouteTarget::Root, FlashMessage::logged_out())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockLoginService, MockSessionStore};
    use crate::domain::{EmailAddress, FlashLevel, PasswordDigest, User, UserId};
    use rstest::{fixture, rstest};

    #[fixture]
    fn ada() -> User {
        User::new(
            UserId::new(5).expect("id"),
            EmailAddress::new("ada@example.com").expect("email"),
            PasswordDigest::hash("analytical").expect("digest"),
        )
    }

    fn login_returning(user: Option<User>) -> MockLoginService {
        let mut login = MockLoginService::new();
        login
            .expect_authenticate()
            .times(1)
            .return_once(move |_| Ok(user));
        login
    }

    fn untouched_session() -> MockSessionStore {
        let mut session = MockSessionStore::new();
        session.expect_persist_user().never();
        session
    }

    #[rstest]
    #[tokio::test]
    async fn success_persists_user_and_redirects_home(ada: User) {
        let login = login_returning(Some(ada));
        let mut session = MockSessionStore::new();
        session
            .expect_persist_user()
            .withf(|id| id.get() == 5)
            .times(1)
            .returning(|_| Ok(()));

        let outcome = attempt_login(&login, &session, "Ada@Example.com", "analytical")
            .await
            .expect("login runs");

        assert_eq!(
            outcome,
            Navigation::redirect(RouteTarget::Root, FlashMessage::logged_in())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn mismatch_re_renders_form_without_touching_session() {
        let login = login_returning(None);
        let session = untouched_session();

        let outcome = attempt_login(&login, &session, "ada@example.com", "wrong")
            .await
            .expect("login runs");

        assert!(!outcome.is_redirect());
        match outcome {
            Navigation::RenderForm { email, flash } => {
                assert_eq!(email, "ada@example.com");
                assert_eq!(flash.level(), FlashLevel::Danger);
            }
            other => panic!("expected form render, got {other:?}"),
        }
    }

    #[rstest]
    #[case("", "analytical")]
    #[case("ada@example.com", "")]
    #[tokio::test]
    async fn blank_fields_fail_like_a_mismatch(#[case] email: &str, #[case] password: &str) {
        let mut login = MockLoginService::new();
        login.expect_authenticate().never();
        let session = untouched_session();

        let outcome = attempt_login(&login, &session, email, password)
            .await
            .expect("login runs");

        assert_eq!(
            outcome,
            Navigation::RenderForm {
                email: email.to_owned(),
                flash: FlashMessage::invalid_credentials(),
            }
        );
    }

    #[rstest]
    fn logout_forgets_user_and_redirects_home() {
        let mut session = MockSessionStore::new();
        session.expect_forget_user().times(1).return_const(());

        let outcome = logout(&session);

        assert_eq!(
            outcome,
            Navigation::redirect(RouteTarget::Root, FlashMessage::logged_out())
        );
    }
}
