//! Database model for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use kantor_core::users::User;

/// Database model for users
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub last_login: Option<NaiveDateTime>,
}

/// Changeset for the mutable profile columns.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = crate::schema::users)]
pub struct UserChangesDB {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    /// `None` leaves the column untouched.
    pub password_hash: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            username: db.username,
            password_hash: db.password_hash,
            first_name: db.first_name,
            last_name: db.last_name,
            phone_number: db.phone_number,
            email: db.email,
            created_at: db.created_at,
            updated_at: db.updated_at,
            last_login: db.last_login,
        }
    }
}
