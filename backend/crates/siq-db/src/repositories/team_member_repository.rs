use crate::error::Result as DbErrorResult;
use crate::row::{parse_timestamp, parse_uuid};

use siq_core::TeamMember;

use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct TeamMemberRow {
    id: String,
    workspace_id: String,
    email: String,
    display_name: String,
    jira_account_id: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl TeamMemberRow {
    fn into_team_member(self) -> DbErrorResult<TeamMember> {
        Ok(TeamMember {
            id: parse_uuid(&self.id, "team_member.id")?,
            workspace_id: parse_uuid(&self.workspace_id, "team_member.workspace_id")?,
            email: self.email,
            display_name: self.display_name,
            jira_account_id: self.jira_account_id,
            created_at: parse_timestamp(self.created_at, "team_member.created_at")?,
            updated_at: parse_timestamp(self.updated_at, "team_member.updated_at")?,
        })
    }
}

pub struct TeamMemberRepository;

impl TeamMemberRepository {
    pub async fn create<'e, E>(executor: E, member: &TeamMember) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(
            r#"
                INSERT INTO siq_team_members (
                    id, workspace_id, email, display_name, jira_account_id,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(member.id.to_string())
        .bind(member.workspace_id.to_string())
        .bind(&member.email)
        .bind(&member.display_name)
        .bind(&member.jira_account_id)
        .bind(member.created_at.timestamp())
        .bind(member.updated_at.timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_id<'e, E>(executor: E, id: Uuid) -> DbErrorResult<Option<TeamMember>>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let row = sqlx::query_as::<_, TeamMemberRow>(
            r#"
                SELECT id, workspace_id, email, display_name, jira_account_id,
                       created_at, updated_at
                FROM siq_team_members
                WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

        row.map(TeamMemberRow::into_team_member).transpose()
    }
}
