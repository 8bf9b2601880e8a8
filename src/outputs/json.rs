//! JSON snapshot output.
//!
//! One file per season, overwritten on every run:
//! ```text
//! output_dir/
//! └── 2024/
//!     └── snapshot.json
//! ```

use crate::error::ScrapeError;
use crate::models::Snapshot;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`Snapshot`] to `{output_dir}/{season}/snapshot.json`.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display()))]
pub async fn write_snapshot(snapshot: &Snapshot, output_dir: &Path) -> Result<PathBuf, ScrapeError> {
    let json = serde_json::to_string_pretty(snapshot)?;

    let season_dir = output_dir.join(snapshot.season.to_string());
    info!(dir = %season_dir.display(), "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&season_dir).await {
        error!(dir = %season_dir.display(), error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = season_dir.join("snapshot.json");
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON snapshot");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Career, Team};

    #[tokio::test]
    async fn test_write_snapshot_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = Snapshot {
            season: 2024,
            generated_at: "2024-04-15T20:30:00+02:00".to_string(),
            east: vec![Team {
                name: "Boston Celtics".to_string(),
                position: 1,
                wins: 64,
                losses: 18,
                win_loss_percentage: 78.0,
                games_behind: "—".to_string(),
            }],
            west: vec![],
            mvp: vec![],
            career: Some(Career {
                player_id: "jamesle01".to_string(),
                seasons: vec![],
            }),
        };

        let path = write_snapshot(&snapshot, dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join("2024").join("snapshot.json"));

        let back: Snapshot = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.east.len(), 1);
        assert_eq!(back.career.unwrap().player_id, "jamesle01");
    }
}
