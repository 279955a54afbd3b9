use crate::export::translate::{
    fallback_issue_type, jira_priority_name, match_story_type, select_priority,
};

use siq_core::TaskPriority;
use siq_jira::types::{IssueType, Priority};

fn issue_type(id: &str, name: &str) -> IssueType {
    IssueType {
        id: id.to_string(),
        name: name.to_string(),
        subtask: false,
    }
}

fn priority(id: &str, name: &str) -> Priority {
    Priority {
        id: id.to_string(),
        name: name.to_string(),
    }
}

#[test]
fn test_story_match_prefers_exact_name() {
    let types = vec![
        issue_type("1", "Epic Story Holder"),
        issue_type("2", "Story"),
    ];
    assert_eq!(match_story_type(&types).unwrap().id, "2");
}

#[test]
fn test_story_match_accepts_user_story() {
    let types = vec![issue_type("1", "Task"), issue_type("2", "User Story")];
    assert_eq!(match_story_type(&types).unwrap().id, "2");
}

#[test]
fn test_story_match_falls_back_to_contains() {
    let types = vec![issue_type("1", "Task"), issue_type("2", "Customer Story")];
    assert_eq!(match_story_type(&types).unwrap().id, "2");
}

#[test]
fn test_story_match_is_case_insensitive() {
    let types = vec![issue_type("1", "STORY")];
    assert_eq!(match_story_type(&types).unwrap().id, "1");
}

#[test]
fn test_story_match_none_without_story() {
    let types = vec![issue_type("1", "Task"), issue_type("2", "Bug")];
    assert!(match_story_type(&types).is_none());
}

#[test]
fn test_fallback_prefers_task_then_issue_then_first() {
    let types = vec![issue_type("1", "Bug"), issue_type("2", "Task")];
    assert_eq!(fallback_issue_type(&types).unwrap().id, "2");

    let types = vec![issue_type("1", "Bug"), issue_type("2", "Issue")];
    assert_eq!(fallback_issue_type(&types).unwrap().id, "2");

    let types = vec![issue_type("1", "Bug"), issue_type("2", "Epic")];
    assert_eq!(fallback_issue_type(&types).unwrap().id, "1");

    assert!(fallback_issue_type(&[]).is_none());
}

#[test]
fn test_priority_name_table() {
    assert_eq!(jira_priority_name(TaskPriority::Urgent), "Highest");
    assert_eq!(jira_priority_name(TaskPriority::High), "High");
    assert_eq!(jira_priority_name(TaskPriority::Medium), "Medium");
    assert_eq!(jira_priority_name(TaskPriority::Low), "Low");
    assert_eq!(jira_priority_name(TaskPriority::None), "Lowest");
}

#[test]
fn test_priority_selection_exact_match() {
    let priorities = vec![priority("1", "Highest"), priority("2", "Medium")];
    assert_eq!(select_priority(&priorities, "Highest").unwrap().id, "1");
}

#[test]
fn test_priority_selection_falls_back_to_medium() {
    let priorities = vec![priority("1", "Blocker"), priority("2", "Medium")];
    assert_eq!(select_priority(&priorities, "Highest").unwrap().id, "2");
}

#[test]
fn test_priority_selection_accepts_normal() {
    let priorities = vec![priority("1", "Blocker"), priority("2", "Normal")];
    assert_eq!(select_priority(&priorities, "Lowest").unwrap().id, "2");
}

#[test]
fn test_priority_selection_first_available_last_resort() {
    let priorities = vec![priority("1", "Blocker"), priority("2", "Critical")];
    assert_eq!(select_priority(&priorities, "Low").unwrap().id, "1");
    assert!(select_priority(&[], "Low").is_none());
}
