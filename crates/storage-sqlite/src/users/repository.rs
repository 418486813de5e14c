use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use kantor_core::errors::ValidationError;
use kantor_core::users::{NewUserRecord, User, UserRecordUpdate, UserRepositoryTrait};
use kantor_core::{Error, Result};

use super::model::{UserChangesDB, UserDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;
use crate::schema::users::dsl::*;

const USER_NOT_FOUND: &str = "User not found";

/// Repository for managing user data in the database
pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

fn load_user(conn: &mut SqliteConnection, user_id: &str) -> Result<Option<User>> {
    Ok(users
        .find(user_id)
        .select(UserDB::as_select())
        .first::<UserDB>(conn)
        .optional()
        .into_core()?
        .map(User::from))
}

/// Reports unique columns already used by a user other than `exclude_id`.
fn unique_conflicts(
    conn: &mut SqliteConnection,
    exclude_id: Option<&str>,
    new_username: Option<&str>,
    new_email: &str,
    new_phone: &str,
) -> Result<Vec<String>> {
    let mut conflicts = Vec::new();
    let other = exclude_id.unwrap_or_default();

    if let Some(new_username) = new_username {
        let taken: i64 = users
            .filter(username.eq(new_username))
            .filter(id.ne(other))
            .count()
            .get_result(conn)
            .into_core()?;
        if taken > 0 {
            conflicts.push("A user with that username already exists.".to_string());
        }
    }

    let taken: i64 = users
        .filter(email.eq(new_email))
        .filter(id.ne(other))
        .count()
        .get_result(conn)
        .into_core()?;
    if taken > 0 {
        conflicts.push("A user with that email already exists.".to_string());
    }

    let taken: i64 = users
        .filter(phone_number.eq(new_phone))
        .filter(id.ne(other))
        .count()
        .get_result(conn)
        .into_core()?;
    if taken > 0 {
        conflicts.push("A user with that phone number already exists.".to_string());
    }

    Ok(conflicts)
}

fn reject_conflicts(conflicts: Vec<String>) -> Result<()> {
    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(ValidationError::Rules(conflicts)))
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create(&self, new_user: NewUserRecord) -> Result<User> {
        self.writer
            .exec(move |conn| {
                reject_conflicts(unique_conflicts(
                    conn,
                    None,
                    Some(&new_user.username),
                    &new_user.email,
                    &new_user.phone_number,
                )?)?;

                let now = Utc::now().naive_utc();
                let user_db = UserDB {
                    id: Uuid::new_v4().to_string(),
                    username: new_user.username,
                    password_hash: new_user.password_hash,
                    first_name: new_user.first_name,
                    last_name: new_user.last_name,
                    phone_number: new_user.phone_number,
                    email: new_user.email,
                    created_at: now,
                    updated_at: now,
                    last_login: None,
                };

                diesel::insert_into(users::table)
                    .values(&user_db)
                    .execute(conn)
                    .into_core()?;

                Ok(User::from(user_db))
            })
            .await
    }

    async fn update(&self, user_update: UserRecordUpdate) -> Result<User> {
        self.writer
            .exec(move |conn| {
                if load_user(conn, &user_update.id)?.is_none() {
                    return Err(Error::NotFound(USER_NOT_FOUND.to_string()));
                }
                reject_conflicts(unique_conflicts(
                    conn,
                    Some(&user_update.id),
                    None,
                    &user_update.email,
                    &user_update.phone_number,
                )?)?;

                let changes = UserChangesDB {
                    first_name: user_update.first_name,
                    last_name: user_update.last_name,
                    phone_number: user_update.phone_number,
                    email: user_update.email,
                    password_hash: user_update.password_hash,
                    updated_at: Utc::now().naive_utc(),
                };
                diesel::update(users.find(user_update.id.as_str()))
                    .set(&changes)
                    .execute(conn)
                    .into_core()?;

                load_user(conn, &user_update.id)?
                    .ok_or_else(|| Error::NotFound(USER_NOT_FOUND.to_string()))
            })
            .await
    }

    async fn delete(&self, user_id: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(users.find(user_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    async fn record_login(&self, user_id: &str, at: NaiveDateTime) -> Result<User> {
        let user_id = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::update(users.find(user_id.as_str()))
                    .set(last_login.eq(Some(at)))
                    .execute(conn)
                    .into_core()?;
                if affected == 0 {
                    return Err(Error::NotFound(USER_NOT_FOUND.to_string()));
                }
                load_user(conn, &user_id)?
                    .ok_or_else(|| Error::NotFound(USER_NOT_FOUND.to_string()))
            })
            .await
    }

    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        load_user(&mut conn, user_id)?.ok_or_else(|| Error::NotFound(USER_NOT_FOUND.to_string()))
    }

    fn find_by_username(&self, name: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(users
            .filter(username.eq(name))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?
            .map(User::from))
    }

    fn list(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let results = users
            .select(UserDB::as_select())
            .order(created_at.asc())
            .load::<UserDB>(&mut conn)
            .into_core()?;
        Ok(results.into_iter().map(User::from).collect())
    }
}
