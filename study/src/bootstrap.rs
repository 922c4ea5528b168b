use anyhow::{Context, Result};
use esv_client::download_file;
use std::time::Duration;
use study_core::files::DataPaths;

/// Reference files run to tens of megabytes.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Create the data directory and fetch any reference file not yet on disk.
/// Returns how many files were downloaded.
pub async fn ensure_data_files(paths: &DataPaths) -> Result<usize> {
    tokio::fs::create_dir_all(&paths.root)
        .await
        .with_context(|| format!("creating data directory {}", paths.root.display()))?;
    let missing = paths.missing_files();
    for file in &missing {
        println!("Downloading {} ...", file.name);
        download_file(file.url, &paths.file(file.name), DOWNLOAD_TIMEOUT)
            .await
            .with_context(|| format!("downloading {}", file.name))?;
    }
    Ok(missing.len())
}
