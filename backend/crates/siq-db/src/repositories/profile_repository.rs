use crate::error::Result as DbErrorResult;
use crate::row::{parse_timestamp, parse_uuid};

use siq_core::Profile;

use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: String,
    email: String,
    display_name: String,
    jira_account_id: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl ProfileRow {
    fn into_profile(self) -> DbErrorResult<Profile> {
        Ok(Profile {
            id: parse_uuid(&self.id, "profile.id")?,
            email: self.email,
            display_name: self.display_name,
            jira_account_id: self.jira_account_id,
            created_at: parse_timestamp(self.created_at, "profile.created_at")?,
            updated_at: parse_timestamp(self.updated_at, "profile.updated_at")?,
        })
    }
}

pub struct ProfileRepository;

impl ProfileRepository {
    pub async fn create<'e, E>(executor: E, profile: &Profile) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO siq_profiles (
                    id, email, display_name, jira_account_id, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(profile.id.to_string())
        .bind(&profile.email)
        .bind(&profile.display_name)
        .bind(&profile.jira_account_id)
        .bind(profile.created_at.timestamp())
        .bind(profile.updated_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<Profile>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
                SELECT id, email, display_name, jira_account_id, created_at, updated_at
                FROM siq_profiles
                WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        row.map(ProfileRow::into_profile).transpose()
    }
}
