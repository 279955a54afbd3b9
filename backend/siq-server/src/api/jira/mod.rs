pub mod export_request;
pub mod export_response;
pub mod jira;
pub mod sprint_folder_export_request;
pub mod sprint_folder_export_response;
