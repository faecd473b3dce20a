use clap::{Args, Parser, Subcommand};
use hbondkit::workflows::ratio::{DEFAULT_CONTACTS_DIR, DEFAULT_ID_LIST, DEFAULT_RATIO_OUTPUT};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

pub const DEFAULT_STRUCTURE_DIR: &str = "./dataset/";

#[derive(Parser, Debug)]
#[command(
    name = "hbondkit",
    version,
    about = "hbondkit - geometric hydrogen-bond detection and contact statistics for PDB structures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and progress bars
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count hydrogen bonds in a directory of PDB files, one result line per structure.
    Analyze(AnalyzeArgs),
    /// Compute intra/inter-chain hydrogen-bond ratios from pre-computed contact tables.
    Ratio(RatioArgs),
    /// Compare the backbone of one residue between two structures.
    Rmsd(RmsdArgs),
    /// Download PDB files from the RCSB archive.
    Fetch(FetchArgs),
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path of the result file (one `<distance>,<angle>` line per structure).
    #[arg(required = true, value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Directory containing `<ID>.pdb` files.
    #[arg(value_name = "STRUCTURE_DIR", default_value = DEFAULT_STRUCTURE_DIR)]
    pub structure_dir: PathBuf,

    /// Structure identifiers to analyze. Defaults to every `*.pdb` in the directory.
    #[arg(long, value_name = "ID", num_args(1..), value_delimiter = ',', conflicts_with = "id_list")]
    pub ids: Vec<String>,

    /// File listing one structure identifier per line.
    #[arg(long, value_name = "PATH")]
    pub id_list: Option<PathBuf>,

    /// Analysis configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Criteria Overrides ---
    /// Override the maximum donor-acceptor distance (Å).
    #[arg(long, value_name = "FLOAT")]
    pub max_da: Option<f64>,

    /// Override the maximum hydrogen-acceptor distance (Å), used with --enforce-ha-distance.
    #[arg(long, value_name = "FLOAT")]
    pub max_ha: Option<f64>,

    /// Override the minimum D-H-A angle (degrees).
    #[arg(long, value_name = "FLOAT")]
    pub min_angle: Option<f64>,

    /// Override the donor-hydrogen covalent bond cutoff (Å).
    #[arg(long, value_name = "FLOAT")]
    pub covalent_cutoff: Option<f64>,

    // --- Hydrogen Handling ---
    /// Synthesize amide hydrogens on backbone nitrogens that have none.
    #[arg(long)]
    pub virtual_hydrogens: bool,

    /// Also require the hydrogen-acceptor distance to be within --max-ha.
    #[arg(long)]
    pub enforce_ha_distance: bool,
}

/// Arguments for the `ratio` subcommand.
#[derive(Args, Debug)]
pub struct RatioArgs {
    /// File listing one structure identifier per line.
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_ID_LIST)]
    pub input: PathBuf,

    /// Path of the ratio report (one line per input identifier).
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_RATIO_OUTPUT)]
    pub output: PathBuf,

    /// Base directory holding `<ID>/*_contacts.csv` tables.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_CONTACTS_DIR)]
    pub contacts_dir: PathBuf,
}

/// Arguments for the `rmsd` subcommand.
#[derive(Args, Debug)]
pub struct RmsdArgs {
    /// Reference structure (PDB file).
    #[arg(required = true, value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// Structure compared against the reference (PDB file).
    #[arg(required = true, value_name = "MODEL")]
    pub model: PathBuf,

    /// Residue sequence number to compare.
    #[arg(short, long, required = true, value_name = "INT", allow_negative_numbers = true)]
    pub residue: isize,

    /// Restrict the residue lookup to one chain.
    #[arg(long, value_name = "CHAR")]
    pub chain: Option<char>,

    /// Atom names to compare.
    #[arg(long, value_name = "NAMES", value_delimiter = ',', default_value = "N,CA,C,O")]
    pub atoms: Vec<String>,

    /// Also write the result line to this file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `fetch` subcommand.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// PDB identifiers to download.
    #[arg(required = true, value_name = "ID")]
    pub ids: Vec<String>,

    /// Destination directory.
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_STRUCTURE_DIR)]
    pub dir: PathBuf,

    /// Re-download files that already exist.
    #[arg(long)]
    pub force: bool,

    /// Base URL of a mirror serving `<ID>.pdb` files, used instead of RCSB.
    #[arg(long, value_name = "URL")]
    pub mirror: Option<String>,
}
