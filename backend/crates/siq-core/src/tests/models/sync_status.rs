use crate::SyncStatus;

use std::str::FromStr;

#[test]
fn test_sync_status_as_str() {
    assert_eq!(SyncStatus::Synced.as_str(), "synced");
    assert_eq!(SyncStatus::Pending.as_str(), "pending");
    assert_eq!(SyncStatus::Error.as_str(), "error");
}

#[test]
fn test_sync_status_from_str() {
    assert_eq!(SyncStatus::from_str("synced").unwrap(), SyncStatus::Synced);
    assert_eq!(
        SyncStatus::from_str("pending").unwrap(),
        SyncStatus::Pending
    );
    assert!(SyncStatus::from_str("done").is_err());
}
