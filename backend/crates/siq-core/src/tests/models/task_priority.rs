use crate::TaskPriority;

use std::str::FromStr;

#[test]
fn test_task_priority_as_str() {
    assert_eq!(TaskPriority::Urgent.as_str(), "urgent");
    assert_eq!(TaskPriority::High.as_str(), "high");
    assert_eq!(TaskPriority::Medium.as_str(), "medium");
    assert_eq!(TaskPriority::Low.as_str(), "low");
    assert_eq!(TaskPriority::None.as_str(), "none");
}

#[test]
fn test_task_priority_from_str() {
    assert_eq!(
        TaskPriority::from_str("urgent").unwrap(),
        TaskPriority::Urgent
    );
    assert_eq!(TaskPriority::from_str("none").unwrap(), TaskPriority::None);
    assert!(TaskPriority::from_str("critical").is_err());
}

#[test]
fn test_task_priority_round_trip() {
    for priority in [
        TaskPriority::Urgent,
        TaskPriority::High,
        TaskPriority::Medium,
        TaskPriority::Low,
        TaskPriority::None,
    ] {
        assert_eq!(TaskPriority::from_str(priority.as_str()).unwrap(), priority);
    }
}
