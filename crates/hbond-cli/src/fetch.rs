use crate::error::{CliError, Result};
use futures_util::{Stream, StreamExt};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const RCSB_DOWNLOAD_URL: &str = "https://files.rcsb.org/download";

#[derive(Debug, Clone, Copy)]
pub enum FetchProgress {
    DownloadStarted { total_size: Option<u64> },
    Downloading { downloaded: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Downloaded { path: PathBuf, bytes: u64 },
    AlreadyPresent { path: PathBuf },
}

/// Downloads coordinate files into a local structure directory.
#[derive(Debug)]
pub struct StructureFetcher {
    client: reqwest::Client,
    base_url: String,
    target_dir: PathBuf,
}

impl StructureFetcher {
    pub fn new(target_dir: &Path) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: RCSB_DOWNLOAD_URL.to_string(),
            target_dir: target_dir.to_path_buf(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn url_for(&self, id: &str) -> String {
        format!("{}/{}.pdb", self.base_url, id)
    }

    pub fn destination(&self, id: &str) -> PathBuf {
        self.target_dir.join(format!("{id}.pdb"))
    }

    pub async fn fetch(
        &self,
        id: &str,
        force: bool,
        mut progress_callback: impl FnMut(FetchProgress),
    ) -> Result<FetchOutcome> {
        validate_id(id)?;
        let path = self.destination(id);
        if path.exists() && !force {
            debug!("{:?} already exists, skipping download.", &path);
            return Ok(FetchOutcome::AlreadyPresent { path });
        }
        fs::create_dir_all(&self.target_dir)?;

        let url = self.url_for(id);
        info!("Sending request to {}", url);
        let response = self.client.get(&url).send().await?.error_for_status()?;

        let total_size = response.content_length();
        progress_callback(FetchProgress::DownloadStarted { total_size });

        let partial_path = path.with_extension("pdb.part");
        let downloaded =
            write_partial(&partial_path, response.bytes_stream(), &mut progress_callback).await?;

        fs::rename(&partial_path, &path)?;
        info!("Saved {} ({} bytes) to {:?}", id, downloaded, &path);
        Ok(FetchOutcome::Downloaded {
            path,
            bytes: downloaded,
        })
    }
}

/// Streams a download into `partial_path`, removing the file again if the
/// transfer or a write fails.
async fn write_partial<S, B, E>(
    partial_path: &Path,
    stream: S,
    progress_callback: &mut impl FnMut(FetchProgress),
) -> Result<u64>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    CliError: From<E>,
{
    let mut stream = std::pin::pin!(stream);
    let written = async {
        let mut file = fs::File::create(partial_path)?;
        let mut downloaded: u64 = 0;
        while let Some(item) = stream.next().await {
            let chunk = item?;
            let chunk = chunk.as_ref();
            file.write_all(chunk)?;
            downloaded += chunk.len() as u64;
            progress_callback(FetchProgress::Downloading { downloaded });
        }
        file.flush()?;
        Ok::<u64, CliError>(downloaded)
    }
    .await;

    if written.is_err() && partial_path.exists() {
        if let Err(e) = fs::remove_file(partial_path) {
            warn!("Could not remove partial download {:?}: {}", partial_path, e);
        }
    }
    written
}

/// Accepts archive identifiers made of ASCII letters and digits only.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CliError::Argument(format!(
            "'{id}' is not a valid PDB identifier"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_and_destinations_follow_the_archive_layout() {
        let fetcher = StructureFetcher::new(Path::new("dataset"));
        assert_eq!(
            fetcher.url_for("2V84"),
            "https://files.rcsb.org/download/2V84.pdb"
        );
        assert_eq!(fetcher.destination("2V84"), Path::new("dataset").join("2V84.pdb"));

        let mirrored = fetcher.with_base_url("http://localhost:8080/files/");
        assert_eq!(mirrored.url_for("1k0p"), "http://localhost:8080/files/1k0p.pdb");
    }

    #[test]
    fn validate_id_rejects_paths_and_blanks() {
        assert!(validate_id("1k0p").is_ok());
        assert!(matches!(validate_id(""), Err(CliError::Argument(_))));
        assert!(matches!(validate_id("../etc"), Err(CliError::Argument(_))));
    }

    #[tokio::test]
    async fn interrupted_stream_removes_the_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let partial = dir.path().join("1k0p.pdb.part");
        let chunks = futures_util::stream::iter(vec![
            Ok(b"ATOM  ".to_vec()),
            Err(std::io::Error::other("connection reset")),
        ]);

        let mut events = Vec::new();
        let result = write_partial(&partial, chunks, &mut |p| events.push(p)).await;

        assert!(matches!(result, Err(CliError::Io(_))));
        assert!(!partial.exists());
        assert_eq!(events.len(), 1);
    }

    #[tokio::test]
    async fn completed_stream_keeps_every_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let partial = dir.path().join("1k0p.pdb.part");
        let chunks = futures_util::stream::iter(vec![
            Ok::<_, std::io::Error>(b"ATOM\n".to_vec()),
            Ok(b"END\n".to_vec()),
        ]);

        let bytes = write_partial(&partial, chunks, &mut |_| {}).await.unwrap();

        assert_eq!(bytes, 9);
        assert_eq!(fs::read_to_string(&partial).unwrap(), "ATOM\nEND\n");
    }

    #[tokio::test]
    async fn existing_file_is_kept_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("1k0p.pdb");
        fs::write(&existing, "END\n").unwrap();

        let fetcher = StructureFetcher::new(dir.path()).with_base_url("http://127.0.0.1:9");
        let outcome = fetcher.fetch("1k0p", false, |_| {}).await.unwrap();
        assert_eq!(outcome, FetchOutcome::AlreadyPresent { path: existing });
    }
}
