use crate::{StatusExternalData, TaskExternalData};

use chrono::Utc;

#[test]
fn test_task_external_data_json_round_trip() {
    let data = TaskExternalData {
        jira_key: "ABC-12".to_string(),
        jira_id: "10042".to_string(),
        jira_project_key: "ABC".to_string(),
        last_synced_at: Utc::now(),
    };

    let json = serde_json::to_string(&data).unwrap();
    let parsed: TaskExternalData = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, data);
}

#[test]
fn test_status_external_data_optional_fields() {
    let json = r#"{"jira_name":"Done","jira_category":null,"jira_color":null,"jira_project_key":"ABC"}"#;
    let parsed: StatusExternalData = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.jira_name, "Done");
    assert!(parsed.jira_category.is_none());
}
