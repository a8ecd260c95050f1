use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    auth::{Identity, error::AuthError},
    error::Error,
    model::{Role, UserProfile},
};

use super::error::DatabaseError;

#[derive(sqlx::FromRow)]
struct ProfileRecord {
    id: i64,
    owner_id: String,
    role: String,
    display_name: Option<String>,
    avatar: Option<String>,
}

impl ProfileRecord {
    fn into_domain(self) -> Result<UserProfile, DatabaseError> {
        let role: Role = self.role.parse().map_err(DatabaseError::Corrupted)?;

        Ok(UserProfile {
            id: self.id,
            owner_id: self.owner_id,
            role,
            display_name: self.display_name,
            avatar: self.avatar,
        })
    }
}

async fn fetch_profile<'e, E>(executor: E, owner_id: &str) -> Result<Option<UserProfile>, Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let record = sqlx::query_as::<_, ProfileRecord>(
        r#"
        SELECT
            id, owner_id, role, display_name, avatar
        FROM
            user_profiles
        WHERE
            owner_id = ?1;
    "#,
    )
    .bind(owner_id)
    .fetch_optional(executor)
    .await
    .map_err(DatabaseError::DatabaseError)?;

    match record {
        Some(record) => Ok(Some(record.into_domain()?)),
        None => Ok(None),
    }
}

/// Creates the owner's profile with the `user` role, or replaces its display
/// name and avatar. The role is never touched here.
#[tracing::instrument(
    name = "upsert user profile",
    skip(pool, owner),
    fields(owner = %owner)
)]
pub async fn upsert_profile(
    pool: &SqlitePool,
    owner: &Identity,
    display_name: Option<&str>,
    avatar: Option<&str>,
) -> Result<i64, Error> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO user_profiles
            (owner_id, role, display_name, avatar)
        VALUES
            (?1, ?2, ?3, ?4)
        ON CONFLICT (owner_id)
        DO UPDATE SET
            display_name = excluded.display_name,
            avatar = excluded.avatar
        RETURNING id;
    "#,
    )
    .bind(owner.subject())
    .bind(Role::User.as_str())
    .bind(display_name)
    .bind(avatar)
    .fetch_one(pool)
    .await
    .map_err(DatabaseError::DatabaseError)?;

    Ok(id)
}

#[tracing::instrument(name = "get user profile", skip(pool))]
pub async fn get_profile(pool: &SqlitePool, owner_id: &str) -> Result<Option<UserProfile>, Error> {
    fetch_profile(pool, owner_id).await
}

#[tracing::instrument(name = "is admin", skip(pool, owner), fields(owner = %owner))]
pub async fn is_admin(pool: &SqlitePool, owner: &Identity) -> Result<bool, Error> {
    let profile = fetch_profile(pool, owner.subject()).await?;

    Ok(profile.is_some_and(|p| p.is_admin()))
}

/// Grants the admin role to `target_owner_id`. The caller must already be an
/// admin; this is checked before the target is looked up.
#[tracing::instrument(
    name = "promote to admin",
    skip(pool, caller),
    fields(caller = %caller)
)]
pub async fn promote_to_admin(
    pool: &SqlitePool,
    caller: &Identity,
    target_owner_id: &str,
) -> Result<UserProfile, Error> {
    let mut tx = pool.begin().await.map_err(DatabaseError::DatabaseError)?;

    let caller_profile = fetch_profile(&mut *tx, caller.subject()).await?;
    if !caller_profile.is_some_and(|p| p.is_admin()) {
        return Err(Error::Auth(AuthError::Forbidden(
            "Only admins can promote users",
        )));
    }

    let record = sqlx::query_as::<_, ProfileRecord>(
        r#"
        UPDATE user_profiles
        SET
            role = ?1
        WHERE
            owner_id = ?2
        RETURNING id, owner_id, role, display_name, avatar;
    "#,
    )
    .bind(Role::Admin.as_str())
    .bind(target_owner_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(DatabaseError::DatabaseError)?;

    let profile = match record {
        Some(record) => record.into_domain()?,
        None => {
            return Err(Error::Database(DatabaseError::NotFound));
        }
    };

    tx.commit().await.map_err(DatabaseError::DatabaseError)?;

    tracing::info!(target_owner_id = %target_owner_id, "Promoted user to admin");

    Ok(profile)
}
