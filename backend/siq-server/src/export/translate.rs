//! Task-to-issue translation: issue type and priority selection.
//!
//! Remote lookups are cached per request so discovery calls made for the
//! first task benefit every later task in the same export loop.

use siq_core::TaskPriority;
use siq_jira::JiraClient;
use siq_jira::types::{IssueType, IssueTypeRef, Priority, PriorityRef};

/// Per-request translation state. `None` in the cached fields means the
/// remote fetch itself failed; the literal-name fallbacks apply then.
pub struct TranslationContext<'a> {
    client: &'a JiraClient,
    project_key: &'a str,
    issue_types: Option<Option<Vec<IssueType>>>,
    priorities: Option<Option<Vec<Priority>>>,
    story_points_field: Option<Option<String>>,
    story_heal_attempted: bool,
}

impl<'a> TranslationContext<'a> {
    pub fn new(client: &'a JiraClient, project_key: &'a str) -> Self {
        Self {
            client,
            project_key,
            issue_types: None,
            priorities: None,
            story_points_field: None,
            story_heal_attempted: false,
        }
    }

    /// Pick the issue type for a task.
    ///
    /// Preference order: a Story-like type on the project, then a one-shot
    /// self-heal adding the global Story type, then Task/Issue/first, and
    /// the literal name "Story" when nothing could be fetched.
    pub async fn issue_type(&mut self) -> IssueTypeRef {
        let Some(types) = self.load_issue_types().await else {
            return IssueTypeRef::by_name("Story");
        };

        if let Some(story) = match_story_type(&types) {
            return IssueTypeRef::by_id(story.id.clone());
        }

        if !self.story_heal_attempted {
            self.story_heal_attempted = true;
            if let Some(types) = self.heal_story_type().await
                && let Some(story) = match_story_type(&types)
            {
                return IssueTypeRef::by_id(story.id.clone());
            }
        }

        let types = self.load_issue_types().await.unwrap_or_default();
        match fallback_issue_type(&types) {
            Some(fallback) => IssueTypeRef::by_id(fallback.id.clone()),
            None => IssueTypeRef::by_name("Story"),
        }
    }

    /// Map a local priority onto one the project actually has.
    pub async fn priority(&mut self, local: TaskPriority) -> PriorityRef {
        let mapped = jira_priority_name(local);

        let Some(priorities) = self.load_priorities().await else {
            return PriorityRef {
                name: "Medium".to_string(),
            };
        };

        match select_priority(&priorities, mapped) {
            Some(priority) => PriorityRef {
                name: priority.name.clone(),
            },
            None => PriorityRef {
                name: "Medium".to_string(),
            },
        }
    }

    /// Discover the story-points custom field id, once per request.
    pub async fn story_points_field(&mut self) -> Option<String> {
        if self.story_points_field.is_none() {
            let field = match self.client.find_story_points_field().await {
                Ok(field) => field,
                Err(e) => {
                    log::warn!("Story points field discovery failed: {}", e);
                    None
                }
            };
            self.story_points_field = Some(field);
        }
        self.story_points_field.clone().flatten()
    }

    async fn load_issue_types(&mut self) -> Option<Vec<IssueType>> {
        if self.issue_types.is_none() {
            let types = match self.client.project_issue_types(self.project_key).await {
                Ok(types) => Some(types),
                Err(e) => {
                    log::warn!("Could not fetch issue types for {}: {}", self.project_key, e);
                    None
                }
            };
            self.issue_types = Some(types);
        }
        self.issue_types.clone().flatten()
    }

    async fn load_priorities(&mut self) -> Option<Vec<Priority>> {
        if self.priorities.is_none() {
            let priorities = match self.client.priorities().await {
                Ok(priorities) => Some(priorities),
                Err(e) => {
                    log::warn!("Could not fetch Jira priorities: {}", e);
                    None
                }
            };
            self.priorities = Some(priorities);
        }
        self.priorities.clone().flatten()
    }

    /// Add the global Story type to the project's issue-type set and
    /// refresh the cache. Returns the refreshed types on success.
    async fn heal_story_type(&mut self) -> Option<Vec<IssueType>> {
        let global = self.client.global_issue_types().await.ok()?;
        let story = global.iter().find(|t| t.name.eq_ignore_ascii_case("story"))?;

        let details = self.client.get_project(self.project_key).await.ok()?;
        let mut ids: Vec<String> = details.issue_types.iter().map(|t| t.id.clone()).collect();
        ids.push(story.id.clone());

        if let Err(e) = self
            .client
            .update_project_issue_types(self.project_key, ids)
            .await
        {
            log::warn!("Failed to add Story type to {}: {}", self.project_key, e);
            return None;
        }

        let refreshed = self.client.project_issue_types(self.project_key).await.ok()?;
        self.issue_types = Some(Some(refreshed.clone()));
        Some(refreshed)
    }
}

/// Story-like issue type: exact "story"/"user story" first, then any type
/// whose name contains "story".
pub(crate) fn match_story_type(types: &[IssueType]) -> Option<&IssueType> {
    types
        .iter()
        .find(|t| {
            t.name.eq_ignore_ascii_case("story") || t.name.eq_ignore_ascii_case("user story")
        })
        .or_else(|| {
            types
                .iter()
                .find(|t| t.name.to_lowercase().contains("story"))
        })
}

/// Fallback chain when no Story type exists: Task, then Issue, then the
/// first type the project offers.
pub(crate) fn fallback_issue_type(types: &[IssueType]) -> Option<&IssueType> {
    types
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case("task"))
        .or_else(|| types.iter().find(|t| t.name.eq_ignore_ascii_case("issue")))
        .or_else(|| types.first())
}

/// Fixed local-to-Jira priority name table.
pub(crate) fn jira_priority_name(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Urgent => "Highest",
        TaskPriority::High => "High",
        TaskPriority::Medium => "Medium",
        TaskPriority::Low => "Low",
        TaskPriority::None => "Lowest",
    }
}

/// Match the mapped name against the available priorities, falling back to
/// a Medium/Normal match, then the first available.
pub(crate) fn select_priority<'a>(priorities: &'a [Priority], mapped: &str) -> Option<&'a Priority> {
    priorities
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(mapped))
        .or_else(|| {
            priorities.iter().find(|p| {
                p.name.eq_ignore_ascii_case("medium") || p.name.eq_ignore_ascii_case("normal")
            })
        })
        .or_else(|| priorities.first())
}
