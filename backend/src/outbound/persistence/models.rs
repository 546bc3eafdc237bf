//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain values before returning.

use diesel::prelude::*;

use super::schema::users;
use crate::domain::{EmailAddress, PasswordDigest, User, UserId};

/// Row read from the `users` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_digest: String,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = UserId::new(row.id).map_err(|err| err.to_string())?;
        let email = EmailAddress::new(&row.email).map_err(|err| err.to_string())?;
        let digest = PasswordDigest::parse(row.password_digest).map_err(|err| err.to_string())?;
        Ok(User::new(id, email, digest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(id: i64, digest: &str) -> UserRow {
        UserRow {
            id,
            email: "Ada@Example.com".to_owned(),
            password_digest: digest.to_owned(),
        }
    }

    #[rstest]
    fn valid_row_converts() {
        let digest = PasswordDigest::hash("secret").expect("hash");
        let user = User::try_from(row(5, digest.as_phc())).expect("valid row");
        assert_eq!(user.id().get(), 5);
        assert_eq!(user.email().as_ref(), "ada@example.com");
        assert!(user.authenticate("secret"));
    }

    #[rstest]
    #[case(0, "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNoaGFzaA")]
    #[case(5, "plaintext")]
    fn corrupt_row_is_rejected(#[case] id: i64, #[case] digest: &str) {
        assert!(User::try_from(row(id, digest)).is_err());
    }
}
