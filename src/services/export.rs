use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::fs;

use crate::{error::AppError, models::trip::Trip};

/// Writes a trip report as a pretty-printed JSON array, one object per trip,
/// into `dir`. Returns the path of the written file.
pub async fn export_trips_json(trips: &[Trip], dir: &Path) -> Result<PathBuf, AppError> {
    let timestamp = Local::now().format("%d%m%Y_%H%M%S");
    let path = dir.join(format!("trips_{timestamp}.json"));
    let data = serde_json::to_vec_pretty(trips).map_err(|err| AppError::Other(err.into()))?;
    fs::write(&path, data).await?;
    Ok(path)
}
