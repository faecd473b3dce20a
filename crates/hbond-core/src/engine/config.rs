use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maximum donor-acceptor distance in Angstroms.
pub const DEFAULT_MAX_DONOR_ACCEPTOR_DISTANCE: f64 = 3.5;
/// Maximum hydrogen-acceptor distance in Angstroms (only applied when enforced).
pub const DEFAULT_MAX_HYDROGEN_ACCEPTOR_DISTANCE: f64 = 2.5;
/// Minimum D-H-A angle in degrees; the angle must be strictly greater.
pub const DEFAULT_MIN_DHA_ANGLE: f64 = 90.0;
/// A hydrogen strictly closer than this to a donor is considered bonded to it.
pub const DEFAULT_COVALENT_BOND_CUTOFF: f64 = 1.6;
/// N-H bond length used when synthesizing backbone amide hydrogens.
pub const VIRTUAL_HYDROGEN_BOND_LENGTH: f64 = 1.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {value} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("Unknown hydrogen mode '{0}'. Expected 'explicit-only' or 'virtual-backbone'.")]
    UnknownHydrogenMode(String),
}

/// Geometric thresholds of the hydrogen-bond predicates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HBondCriteria {
    pub max_donor_acceptor_distance: f64,
    pub max_hydrogen_acceptor_distance: f64,
    pub min_dha_angle: f64,
    pub covalent_bond_cutoff: f64,
}

impl Default for HBondCriteria {
    fn default() -> Self {
        Self {
            max_donor_acceptor_distance: DEFAULT_MAX_DONOR_ACCEPTOR_DISTANCE,
            max_hydrogen_acceptor_distance: DEFAULT_MAX_HYDROGEN_ACCEPTOR_DISTANCE,
            min_dha_angle: DEFAULT_MIN_DHA_ANGLE,
            covalent_bond_cutoff: DEFAULT_COVALENT_BOND_CUTOFF,
        }
    }
}

impl HBondCriteria {
    fn validate(&self) -> Result<(), ConfigError> {
        let distances = [
            ("max_donor_acceptor_distance", self.max_donor_acceptor_distance),
            (
                "max_hydrogen_acceptor_distance",
                self.max_hydrogen_acceptor_distance,
            ),
            ("covalent_bond_cutoff", self.covalent_bond_cutoff),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    name,
                    value,
                    reason: "must be a finite, positive distance",
                });
            }
        }
        if !(0.0..=180.0).contains(&self.min_dha_angle) {
            return Err(ConfigError::InvalidValue {
                name: "min_dha_angle",
                value: self.min_dha_angle,
                reason: "must lie within [0, 180] degrees",
            });
        }
        Ok(())
    }
}

/// Where the angle criterion gets its hydrogen positions from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HydrogenMode {
    /// Only hydrogens present in the input. Donors without them are judged
    /// on distance alone.
    #[default]
    ExplicitOnly,
    /// Additionally place one amide hydrogen on backbone `N` donors that carry
    /// no explicit hydrogen, from N, CA and the preceding residue's C.
    VirtualBackbone,
}

impl FromStr for HydrogenMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "explicit-only" | "explicit_only" | "explicit" => Ok(HydrogenMode::ExplicitOnly),
            "virtual-backbone" | "virtual_backbone" | "virtual" => {
                Ok(HydrogenMode::VirtualBackbone)
            }
            _ => Err(ConfigError::UnknownHydrogenMode(s.to_string())),
        }
    }
}

impl fmt::Display for HydrogenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HydrogenMode::ExplicitOnly => "explicit-only",
            HydrogenMode::VirtualBackbone => "virtual-backbone",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisConfig {
    pub criteria: HBondCriteria,
    pub hydrogen_mode: HydrogenMode,
    /// Also require the hydrogen to lie within `max_hydrogen_acceptor_distance`
    /// of the acceptor before the angle counts. Off by default.
    pub enforce_hydrogen_acceptor_distance: bool,
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    max_donor_acceptor_distance: Option<f64>,
    max_hydrogen_acceptor_distance: Option<f64>,
    min_dha_angle: Option<f64>,
    covalent_bond_cutoff: Option<f64>,
    hydrogen_mode: Option<HydrogenMode>,
    enforce_hydrogen_acceptor_distance: Option<bool>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_donor_acceptor_distance(mut self, distance: f64) -> Self {
        self.max_donor_acceptor_distance = Some(distance);
        self
    }
    pub fn max_hydrogen_acceptor_distance(mut self, distance: f64) -> Self {
        self.max_hydrogen_acceptor_distance = Some(distance);
        self
    }
    pub fn min_dha_angle(mut self, degrees: f64) -> Self {
        self.min_dha_angle = Some(degrees);
        self
    }
    pub fn covalent_bond_cutoff(mut self, distance: f64) -> Self {
        self.covalent_bond_cutoff = Some(distance);
        self
    }
    pub fn hydrogen_mode(mut self, mode: HydrogenMode) -> Self {
        self.hydrogen_mode = Some(mode);
        self
    }
    pub fn enforce_hydrogen_acceptor_distance(mut self, enforce: bool) -> Self {
        self.enforce_hydrogen_acceptor_distance = Some(enforce);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let defaults = HBondCriteria::default();
        let criteria = HBondCriteria {
            max_donor_acceptor_distance: self
                .max_donor_acceptor_distance
                .unwrap_or(defaults.max_donor_acceptor_distance),
            max_hydrogen_acceptor_distance: self
                .max_hydrogen_acceptor_distance
                .unwrap_or(defaults.max_hydrogen_acceptor_distance),
            min_dha_angle: self.min_dha_angle.unwrap_or(defaults.min_dha_angle),
            covalent_bond_cutoff: self
                .covalent_bond_cutoff
                .unwrap_or(defaults.covalent_bond_cutoff),
        };
        criteria.validate()?;

        Ok(AnalysisConfig {
            criteria,
            hydrogen_mode: self.hydrogen_mode.unwrap_or_default(),
            enforce_hydrogen_acceptor_distance: self
                .enforce_hydrogen_acceptor_distance
                .unwrap_or(false),
        })
    }
}
