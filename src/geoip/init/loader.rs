//! Database download and file loading.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use reqwest::StatusCode;

use crate::config::{DB_DOWNLOAD_TIMEOUT, MAX_DB_DOWNLOAD_SIZE};
use crate::error_handling::{DatabaseError, ProvisionError};
use crate::geoip::reader::IpdbReader;

/// Makes sure the database file exists, downloading it from `url` if not.
///
/// An existing file is trusted as-is. Returns `true` when a download happened.
///
/// The body is written to `<path>.part` and renamed into place, so a failed
/// download never leaves a truncated database behind.
pub async fn ensure_database(path: &Path, url: &str) -> Result<bool, ProvisionError> {
    ensure_database_with_limit(path, url, MAX_DB_DOWNLOAD_SIZE).await
}

async fn ensure_database_with_limit(
    path: &Path,
    url: &str,
    max: usize,
) -> Result<bool, ProvisionError> {
    if tokio::fs::metadata(path).await.is_ok() {
        log::debug!("Using existing database: {}", path.display());
        return Ok(false);
    }

    log::warn!("{} not found, downloading from {}", path.display(), url);
    let bytes = download_database(url, max).await?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| ProvisionError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    let partial = partial_path(path);
    tokio::fs::write(&partial, &bytes)
        .await
        .map_err(|source| ProvisionError::Io {
            path: partial.clone(),
            source,
        })?;

    if let Err(source) = tokio::fs::rename(&partial, path).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(ProvisionError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    log::info!(
        "Downloaded {} bytes to {}",
        bytes.len(),
        path.display()
    );
    Ok(true)
}

/// Fetches the database body, enforcing the status and a `max` byte size.
async fn download_database(url: &str, max: usize) -> Result<Vec<u8>, ProvisionError> {
    let network = |source| ProvisionError::Network {
        url: url.to_string(),
        source,
    };

    let client = reqwest::Client::builder()
        .timeout(DB_DOWNLOAD_TIMEOUT)
        .build()
        .map_err(network)?;

    let response = client.get(url).send().await.map_err(network)?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(ProvisionError::HttpStatus {
            url: url.to_string(),
            status,
        });
    }

    // Check content-length header if available
    if let Some(content_length) = response.content_length() {
        if content_length > max as u64 {
            return Err(ProvisionError::TooLarge {
                url: url.to_string(),
                size: content_length,
                max,
            });
        }
    }

    let bytes = response.bytes().await.map_err(network)?;

    // Double-check size after download (in case content-length was missing or wrong)
    if bytes.len() > max {
        return Err(ProvisionError::TooLarge {
            url: url.to_string(),
            size: bytes.len() as u64,
            max,
        });
    }

    Ok(bytes.to_vec())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}

/// Reads and parses the database file.
pub async fn load_database(path: &Path, language: &str) -> Result<IpdbReader, DatabaseError> {
    log::info!("Loading IP database from: {}", path.display());

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| DatabaseError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let reader = IpdbReader::from_bytes(bytes, language)?;

    let metadata = reader.metadata();
    let build = chrono::DateTime::from_timestamp(metadata.build, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| metadata.build.to_string());
    log::debug!(
        "IP database build {}: {} nodes, fields {:?}",
        build,
        metadata.node_count,
        metadata.fields
    );

    Ok(reader)
}
