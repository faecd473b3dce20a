use crate::cli::RmsdArgs;
use crate::error::{CliError, Result};
use hbondkit::{
    core::{
        io::{pdb::PdbFile, report::write_lines, traits::StructureFile},
        models::structure::Structure,
    },
    engine::error::EngineError,
    workflows::rmsd::{ResidueSelector, residue_rmsd},
};
use std::path::Path;
use tracing::info;

fn load(path: &Path) -> Result<Structure> {
    let id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("structure");
    info!("Loading structure from {:?}", path);
    let (structure, _) = PdbFile::read_from_path(path, id).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    Ok(structure)
}

pub async fn run(args: RmsdArgs) -> Result<()> {
    let reference = load(&args.reference)?;
    let model = load(&args.model)?;

    let mut selector = ResidueSelector::backbone(args.residue).with_atoms(args.atoms.iter().cloned());
    if let Some(chain) = args.chain {
        selector = selector.with_chain(chain);
    }

    let report = residue_rmsd(&reference, &model, &selector)?;
    for missing in &report.missing {
        println!(
            "Warning: atom {} missing in {}",
            missing.atom_name, missing.structure
        );
    }
    println!("{}", report);

    if let Some(output) = &args.output {
        write_lines(output, [&report]).map_err(|source| EngineError::Output {
            path: output.clone(),
            source,
        })?;
        println!("Result saved to {}", output.display());
    }
    Ok(())
}
