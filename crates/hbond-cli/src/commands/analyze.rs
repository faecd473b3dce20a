use crate::cli::AnalyzeArgs;
use crate::config::PartialAnalysisConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use hbondkit::{
    engine::progress::ProgressReporter,
    workflows::{
        batch::{self, EntryStatus},
        ratio,
    },
};
use tracing::{info, warn};

pub async fn run(args: AnalyzeArgs, show_progress: bool) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialAnalysisConfig::from_file(path)?,
        None => PartialAnalysisConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;
    info!(?config, "Resolved analysis configuration.");

    let ids = resolve_ids(&args)?;
    if ids.is_empty() {
        warn!("No structures to analyze in {:?}.", &args.structure_dir);
    }

    let progress_handler = CliProgressHandler::new(show_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Analyzing {} structure(s) from {}...",
        ids.len(),
        args.structure_dir.display()
    );
    let entries = tokio::task::block_in_place(|| {
        batch::run(&ids, &args.structure_dir, &config, &reporter)
    })?;

    batch::write_report(&args.output, &entries)?;

    let failed = entries
        .iter()
        .filter(|entry| entry.status != EntryStatus::Analyzed)
        .count();
    if failed > 0 {
        println!(
            "Warning: {} of {} structure(s) could not be analyzed and were reported as 0,0.",
            failed,
            entries.len()
        );
    }
    println!("Results saved to {}", args.output.display());

    Ok(())
}

fn resolve_ids(args: &AnalyzeArgs) -> Result<Vec<String>> {
    if !args.ids.is_empty() {
        return Ok(args.ids.clone());
    }
    if let Some(list) = &args.id_list {
        let ids = ratio::read_id_list(list)?
            .into_iter()
            .filter(|id| !id.is_empty())
            .collect();
        return Ok(ids);
    }
    Ok(batch::discover_ids(&args.structure_dir)?)
}
