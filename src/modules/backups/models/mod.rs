use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A ledger snapshot in the backup directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupInfo {
    pub name: String,
    pub size_bytes: u64,
    pub modified_at: DateTime<Utc>,
}
