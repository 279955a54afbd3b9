use crate::error::{JiraError, Result as JiraResult};
use crate::types::{
    AssignIssueRequest, Board, CreateBoardRequest, CreateFilterRequest, CreateIssueRequest,
    CreateProjectRequest, CreateSprintRequest, CreatedIssue, CreatedProject, ErrorBody, Field,
    Filter, IssueType, IssueTypeStatuses, JiraStatus, JiraUser, MoveIssuesRequest, Priority,
    ProjectDetails, RemoteSprint, TransitionRef, TransitionRequest, TransitionsResponse,
    UpdateProjectIssueTypesRequest,
};

use std::panic::Location;
use std::time::Duration;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use reqwest::{Client as ReqwestClient, Method, StatusCode};
use serde::de::DeserializeOwned;

/// Caller-supplied Jira credentials, fresh on every export request.
#[derive(Debug, Clone)]
pub struct JiraCredentials {
    pub domain: String,
    pub email: String,
    pub api_token: String,
}

impl JiraCredentials {
    pub fn is_complete(&self) -> bool {
        !self.domain.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.api_token.trim().is_empty()
    }
}

/// HTTP client for the Jira Cloud REST API, basic auth per request.
pub struct JiraClient {
    base_url: String,
    email: String,
    api_token: String,
    http: ReqwestClient,
}

impl JiraClient {
    /// Create a client for the given credentials.
    ///
    /// The domain may be a bare Atlassian host ("acme.atlassian.net") or a
    /// full URL (used by tests pointing at a mock server).
    pub fn new(credentials: &JiraCredentials, timeout: Duration) -> JiraResult<Self> {
        let domain = credentials.domain.trim();
        let base_url = if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", domain)
        };

        let http = ReqwestClient::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            email: credentials.email.clone(),
            api_token: credentials.api_token.clone(),
            http,
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.http
            .request(method, &url)
            .basic_auth(&self.email, Some(&self.api_token))
            .header("Accept", "application/json")
    }

    /// Execute a request and decode the JSON body
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        req: reqwest::RequestBuilder,
    ) -> JiraResult<T> {
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| JiraError::Decode {
            operation: operation.to_string(),
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Execute a request whose success response carries no useful body
    async fn execute_empty(&self, req: reqwest::RequestBuilder) -> JiraResult<()> {
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }

        Ok(())
    }

    async fn api_error(status: StatusCode, response: reqwest::Response) -> JiraError {
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.flatten())
                .unwrap_or(body),
            Err(_) => "Unknown error".to_string(),
        };
        JiraError::api(status.as_u16(), message)
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// GET /rest/api/2/myself - the authenticated user, used as project lead
    pub async fn current_user(&self) -> JiraResult<JiraUser> {
        let req = self.request(Method::GET, "/rest/api/2/myself");
        self.execute("current_user", req).await
    }

    // =========================================================================
    // Projects & issue types
    // =========================================================================

    pub async fn create_project(&self, request: &CreateProjectRequest) -> JiraResult<CreatedProject> {
        let req = self.request(Method::POST, "/rest/api/2/project").json(request);
        self.execute("create_project", req).await
    }

    pub async fn get_project(&self, project_key: &str) -> JiraResult<ProjectDetails> {
        let req = self.request(Method::GET, &format!("/rest/api/2/project/{}", project_key));
        self.execute("get_project", req).await
    }

    /// Issue types currently enabled on a project
    pub async fn project_issue_types(&self, project_key: &str) -> JiraResult<Vec<IssueType>> {
        let details = self.get_project(project_key).await?;
        Ok(details.issue_types)
    }

    /// All issue types defined on the Jira site
    pub async fn global_issue_types(&self) -> JiraResult<Vec<IssueType>> {
        let req = self.request(Method::GET, "/rest/api/2/issuetype");
        self.execute("global_issue_types", req).await
    }

    /// Replace the project's allowed issue-type set
    pub async fn update_project_issue_types(
        &self,
        project_key: &str,
        issue_type_ids: Vec<String>,
    ) -> JiraResult<()> {
        let body = UpdateProjectIssueTypesRequest { issue_type_ids };
        let req = self
            .request(Method::PUT, &format!("/rest/api/2/project/{}", project_key))
            .json(&body);
        self.execute_empty(req).await
    }

    pub async fn priorities(&self) -> JiraResult<Vec<Priority>> {
        let req = self.request(Method::GET, "/rest/api/2/priority");
        self.execute("priorities", req).await
    }

    // =========================================================================
    // Filters & boards
    // =========================================================================

    pub async fn my_filters(&self) -> JiraResult<Vec<Filter>> {
        let req = self.request(Method::GET, "/rest/api/2/filter/my");
        self.execute("my_filters", req).await
    }

    pub async fn create_filter(&self, request: &CreateFilterRequest) -> JiraResult<Filter> {
        let req = self.request(Method::POST, "/rest/api/2/filter").json(request);
        self.execute("create_filter", req).await
    }

    pub async fn create_board(&self, request: &CreateBoardRequest) -> JiraResult<Board> {
        let req = self.request(Method::POST, "/rest/agile/1.0/board").json(request);
        self.execute("create_board", req).await
    }

    // =========================================================================
    // Issues
    // =========================================================================

    pub async fn create_issue(&self, request: &CreateIssueRequest) -> JiraResult<CreatedIssue> {
        let req = self.request(Method::POST, "/rest/api/2/issue").json(request);
        self.execute("create_issue", req).await
    }

    pub async fn assign_issue(&self, issue_key: &str, account_id: &str) -> JiraResult<()> {
        let body = AssignIssueRequest {
            account_id: account_id.to_string(),
        };
        let req = self
            .request(
                Method::PUT,
                &format!("/rest/api/2/issue/{}/assignee", issue_key),
            )
            .json(&body);
        self.execute_empty(req).await
    }

    /// PUT arbitrary fields onto an issue (used for story points, whose
    /// custom-field id is instance-specific)
    pub async fn update_issue_fields(
        &self,
        issue_key: &str,
        fields: serde_json::Value,
    ) -> JiraResult<()> {
        let body = serde_json::json!({ "fields": fields });
        let req = self
            .request(Method::PUT, &format!("/rest/api/2/issue/{}", issue_key))
            .json(&body);
        self.execute_empty(req).await
    }

    /// Best-effort discovery of the story-points custom field. Field ids
    /// vary per Jira instance, so this matches on the field name and a
    /// miss is a silent skip for the caller.
    pub async fn find_story_points_field(&self) -> JiraResult<Option<String>> {
        let req = self.request(Method::GET, "/rest/api/2/field");
        let fields: Vec<Field> = self.execute("find_story_points_field", req).await?;

        Ok(fields
            .into_iter()
            .find(|f| {
                let name = f.name.to_lowercase();
                name == "story points" || name == "story point estimate"
            })
            .map(|f| f.id))
    }

    // =========================================================================
    // Statuses & transitions
    // =========================================================================

    /// Statuses per issue type for a project
    pub async fn project_statuses(&self, project_key: &str) -> JiraResult<Vec<IssueTypeStatuses>> {
        let req = self.request(
            Method::GET,
            &format!("/rest/api/2/project/{}/statuses", project_key),
        );
        self.execute("project_statuses", req).await
    }

    /// Move an issue to the given status id, when a transition to it is
    /// currently available. Returns false when no transition leads there.
    pub async fn transition_issue_to_status(
        &self,
        issue_key: &str,
        status_id: &str,
    ) -> JiraResult<bool> {
        let req = self.request(
            Method::GET,
            &format!("/rest/api/2/issue/{}/transitions", issue_key),
        );
        let available: TransitionsResponse = self.execute("transitions", req).await?;

        let Some(transition) = available.transitions.iter().find(|t| t.to.id == status_id) else {
            return Ok(false);
        };

        let body = TransitionRequest {
            transition: TransitionRef {
                id: transition.id.clone(),
            },
        };
        let req = self
            .request(
                Method::POST,
                &format!("/rest/api/2/issue/{}/transitions", issue_key),
            )
            .json(&body);
        self.execute_empty(req).await?;
        Ok(true)
    }

    /// Flattened, id-deduplicated view of a project's statuses
    pub async fn all_project_statuses(&self, project_key: &str) -> JiraResult<Vec<JiraStatus>> {
        let per_type = self.project_statuses(project_key).await?;

        let mut seen = std::collections::HashSet::new();
        let mut statuses = Vec::new();
        for issue_type in per_type {
            for status in issue_type.statuses {
                if seen.insert(status.id.clone()) {
                    statuses.push(status);
                }
            }
        }
        Ok(statuses)
    }

    // =========================================================================
    // Sprints
    // =========================================================================

    pub async fn create_sprint(
        &self,
        board_id: i64,
        name: &str,
        goal: Option<&str>,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> JiraResult<RemoteSprint> {
        let body = CreateSprintRequest {
            name: name.to_string(),
            origin_board_id: board_id,
            goal: goal.map(String::from),
            start_date: start_date.map(|dt| dt.to_rfc3339()),
            end_date: end_date.map(|dt| dt.to_rfc3339()),
        };
        let req = self.request(Method::POST, "/rest/agile/1.0/sprint").json(&body);
        self.execute("create_sprint", req).await
    }

    /// Move issues into a sprint by key, one batched call per sprint
    pub async fn move_issues_to_sprint(
        &self,
        sprint_id: i64,
        issue_keys: Vec<String>,
    ) -> JiraResult<()> {
        let body = MoveIssuesRequest { issues: issue_keys };
        let req = self
            .request(
                Method::POST,
                &format!("/rest/agile/1.0/sprint/{}/issue", sprint_id),
            )
            .json(&body);
        self.execute_empty(req).await
    }
}
