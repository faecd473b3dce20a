use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use hbondkit::engine::config::{self as core_config, HydrogenMode};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialCriteriaConfig {
    #[serde(rename = "max-donor-acceptor-distance")]
    max_donor_acceptor_distance: Option<f64>,
    #[serde(rename = "max-hydrogen-acceptor-distance")]
    max_hydrogen_acceptor_distance: Option<f64>,
    #[serde(rename = "min-dha-angle")]
    min_dha_angle: Option<f64>,
    #[serde(rename = "covalent-bond-cutoff")]
    covalent_bond_cutoff: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialHydrogenConfig {
    mode: Option<String>,
    #[serde(rename = "enforce-hydrogen-acceptor-distance")]
    enforce_hydrogen_acceptor_distance: Option<bool>,
}

/// Analysis settings as read from a TOML file; every key is optional.
///
/// ```toml
/// [criteria]
/// max-donor-acceptor-distance = 3.5
/// min-dha-angle = 90.0
///
/// [hydrogens]
/// mode = "virtual-backbone"
/// ```
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAnalysisConfig {
    criteria: Option<PartialCriteriaConfig>,
    hydrogens: Option<PartialHydrogenConfig>,
}

impl PartialAnalysisConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Resolves the final configuration: command-line flags win over the file,
    /// the file wins over built-in defaults.
    pub fn merge_with_cli(self, args: &AnalyzeArgs) -> Result<core_config::AnalysisConfig> {
        let criteria = self.criteria.unwrap_or_default();
        let hydrogens = self.hydrogens.unwrap_or_default();

        let file_mode = hydrogens
            .mode
            .as_deref()
            .map(str::parse::<HydrogenMode>)
            .transpose()
            .map_err(|e| CliError::Config(e.to_string()))?;
        let hydrogen_mode = if args.virtual_hydrogens {
            HydrogenMode::VirtualBackbone
        } else {
            file_mode.unwrap_or_default()
        };
        let enforce = args.enforce_ha_distance
            || hydrogens
                .enforce_hydrogen_acceptor_distance
                .unwrap_or(false);

        let mut builder = core_config::AnalysisConfigBuilder::new()
            .hydrogen_mode(hydrogen_mode)
            .enforce_hydrogen_acceptor_distance(enforce);
        if let Some(value) = args.max_da.or(criteria.max_donor_acceptor_distance) {
            builder = builder.max_donor_acceptor_distance(value);
        }
        if let Some(value) = args.max_ha.or(criteria.max_hydrogen_acceptor_distance) {
            builder = builder.max_hydrogen_acceptor_distance(value);
        }
        if let Some(value) = args.min_angle.or(criteria.min_dha_angle) {
            builder = builder.min_dha_angle(value);
        }
        if let Some(value) = args.covalent_cutoff.or(criteria.covalent_bond_cutoff) {
            builder = builder.covalent_bond_cutoff(value);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;

    fn analyze_args(extra: &[&str]) -> AnalyzeArgs {
        let mut argv = vec!["hbondkit", "analyze", "out.txt"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Analyze(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn empty_file_and_no_flags_yield_defaults() {
        let config = PartialAnalysisConfig::from_toml("")
            .unwrap()
            .merge_with_cli(&analyze_args(&[]))
            .unwrap();
        assert_eq!(config, core_config::AnalysisConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let toml = r#"
            [criteria]
            max-donor-acceptor-distance = 3.2
            min-dha-angle = 120.0

            [hydrogens]
            mode = "virtual-backbone"
            enforce-hydrogen-acceptor-distance = true
        "#;
        let config = PartialAnalysisConfig::from_toml(toml)
            .unwrap()
            .merge_with_cli(&analyze_args(&[]))
            .unwrap();
        assert_eq!(config.criteria.max_donor_acceptor_distance, 3.2);
        assert_eq!(config.criteria.min_dha_angle, 120.0);
        assert_eq!(config.criteria.covalent_bond_cutoff, 1.6);
        assert_eq!(config.hydrogen_mode, HydrogenMode::VirtualBackbone);
        assert!(config.enforce_hydrogen_acceptor_distance);
    }

    #[test]
    fn cli_flags_override_file_values() {
        let toml = r#"
            [criteria]
            max-donor-acceptor-distance = 3.2
            covalent-bond-cutoff = 1.3
        "#;
        let args = analyze_args(&["--max-da", "3.9", "--virtual-hydrogens"]);
        let config = PartialAnalysisConfig::from_toml(toml)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();
        assert_eq!(config.criteria.max_donor_acceptor_distance, 3.9);
        assert_eq!(config.criteria.covalent_bond_cutoff, 1.3);
        assert_eq!(config.hydrogen_mode, HydrogenMode::VirtualBackbone);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(PartialAnalysisConfig::from_toml("[criteria]\nmax-distance = 3.0\n").is_err());
        assert!(PartialAnalysisConfig::from_toml("[output]\npath = \"x\"\n").is_err());
    }

    #[test]
    fn invalid_values_surface_as_config_errors() {
        let toml = "[hydrogens]\nmode = \"guess\"\n";
        let result = PartialAnalysisConfig::from_toml(toml)
            .unwrap()
            .merge_with_cli(&analyze_args(&[]));
        assert!(matches!(result, Err(CliError::Config(_))));

        let result = PartialAnalysisConfig::default().merge_with_cli(&analyze_args(&["--min-angle", "270"]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn from_file_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.toml");
        fs::write(&path, "[criteria\n").unwrap();
        let result = PartialAnalysisConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }
}
