use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tokio::fs;
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::backups::models::BackupInfo;

const BACKUP_EXTENSION: &str = ".db";

/// Snapshots of the SQLite ledger.
///
/// Snapshots are taken with `VACUUM INTO`, which produces a consistent copy
/// while the pool stays open. Restoring is an offline file copy.
pub struct BackupService {
    pool: SqlitePool,
    dir: PathBuf,
}

impl BackupService {
    pub fn new(pool: SqlitePool, dir: impl Into<PathBuf>) -> Self {
        Self {
            pool,
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a new `backup_YYYYmmdd_HHMMSS.db` snapshot
    pub async fn create(&self) -> Result<BackupInfo> {
        fs::create_dir_all(&self.dir).await?;

        let stem = format!("backup_{}", Utc::now().format("%Y%m%d_%H%M%S"));
        let mut name = format!("{}{}", stem, BACKUP_EXTENSION);
        let mut suffix = 1;
        // VACUUM INTO refuses to overwrite; two snapshots in one second get a suffix
        while fs::try_exists(self.dir.join(&name)).await? {
            name = format!("{}_{}{}", stem, suffix, BACKUP_EXTENSION);
            suffix += 1;
        }

        let path = self.dir.join(&name);
        let target = path
            .to_str()
            .ok_or_else(|| AppError::internal("Backup path is not valid UTF-8"))?;

        sqlx::query("VACUUM INTO ?")
            .bind(target)
            .execute(&self.pool)
            .await?;

        let info = self.describe(&name).await?;
        info!(backup = %info.name, size_bytes = info.size_bytes, "Backup created");
        Ok(info)
    }

    /// Snapshots in the backup directory, newest first
    pub async fn list(&self) -> Result<Vec<BackupInfo>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut backups = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !name.ends_with(BACKUP_EXTENSION) || !entry.file_type().await?.is_file() {
                continue;
            }
            backups.push(self.describe(&name).await?);
        }

        backups.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| b.name.cmp(&a.name))
        });
        Ok(backups)
    }

    /// Remove a snapshot by file name
    pub async fn delete(&self, name: &str) -> Result<()> {
        validate_backup_name(name)?;

        let path = self.dir.join(name);
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(backup = %name, "Backup deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(backup = %name, "Backup to delete was not found");
                Err(AppError::not_found(format!("Backup {}", name)))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn describe(&self, name: &str) -> Result<BackupInfo> {
        let metadata = fs::metadata(self.dir.join(name)).await?;
        let modified_at = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        Ok(BackupInfo {
            name: name.to_string(),
            size_bytes: metadata.len(),
            modified_at,
        })
    }
}

/// Backup names are plain `*.db` file names, never paths
pub fn validate_backup_name(name: &str) -> Result<()> {
    let stem = name.strip_suffix(BACKUP_EXTENSION).unwrap_or_default();
    let plain = !stem.is_empty()
        && stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if !plain {
        return Err(AppError::validation(format!(
            "Invalid backup name '{}'. Expected a plain *.db file name",
            name
        )));
    }
    Ok(())
}
