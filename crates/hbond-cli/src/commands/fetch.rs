use crate::cli::FetchArgs;
use crate::error::{CliError, Result};
use crate::fetch::{FetchOutcome, FetchProgress, StructureFetcher};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::{error, info};

pub async fn run(args: FetchArgs, show_progress: bool) -> Result<()> {
    let fetcher = match &args.mirror {
        Some(base_url) => StructureFetcher::new(&args.dir).with_base_url(base_url),
        None => StructureFetcher::new(&args.dir),
    };
    println!("Downloading {} structure(s) to {}", args.ids.len(), args.dir.display());

    let mut failures = 0usize;
    for id in &args.ids {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::with_template(
                "{msg:<8} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})",
            )
            .map_err(|e| CliError::Other(e.into()))?
            .progress_chars("#>-"),
        );
        pb.set_draw_target(if show_progress {
            ProgressDrawTarget::stderr_with_hz(4)
        } else {
            ProgressDrawTarget::hidden()
        });
        pb.set_message(id.clone());

        let progress_callback = |progress: FetchProgress| match progress {
            FetchProgress::DownloadStarted { total_size } => {
                if let Some(size) = total_size {
                    pb.set_length(size);
                }
            }
            FetchProgress::Downloading { downloaded } => {
                pb.set_position(downloaded);
            }
        };

        match fetcher.fetch(id, args.force, progress_callback).await {
            Ok(FetchOutcome::Downloaded { path, .. }) => {
                pb.finish_and_clear();
                println!("✓ {} -> {}", id, path.display());
            }
            Ok(FetchOutcome::AlreadyPresent { path }) => {
                pb.finish_and_clear();
                println!("• {} already present at {} (use --force to re-download)", id, path.display());
            }
            Err(e) => {
                pb.finish_and_clear();
                error!("Failed to download {}: {}", id, e);
                eprintln!("✗ {}: {}", id, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(CliError::Fetch(format!(
            "{} of {} download(s) failed",
            failures,
            args.ids.len()
        )));
    }
    info!("All downloads completed.");
    Ok(())
}
