use crate::cli::RatioArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use hbondkit::{
    core::io::report::write_lines,
    engine::{error::EngineError, progress::ProgressReporter},
    workflows::ratio::{self, RatioLine},
};
use tracing::info;

pub async fn run(args: RatioArgs, show_progress: bool) -> Result<()> {
    let ids = ratio::read_id_list(&args.input)?;
    info!(
        "Read {} identifier(s) from {:?}.",
        ids.len(),
        &args.input
    );

    let progress_handler = CliProgressHandler::new(show_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let lines = tokio::task::block_in_place(|| ratio::run(&ids, &args.contacts_dir, &reporter));

    write_lines(&args.output, &lines).map_err(|source| EngineError::Output {
        path: args.output.clone(),
        source,
    })?;

    let unresolved = lines
        .iter()
        .filter(|line| !matches!(line, RatioLine::Ratio(_)))
        .count();
    if unresolved > 0 {
        println!(
            "Warning: {} of {} identifier(s) have no ratio.",
            unresolved,
            lines.len()
        );
    }
    println!("Results saved to {}", args.output.display());
    Ok(())
}
