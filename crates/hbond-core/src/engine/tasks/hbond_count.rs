use crate::core::models::atom::Atom;
use crate::core::models::ids::{AtomId, ModelId};
use crate::core::models::structure::Structure;
use crate::core::topology::classification::classify;
use crate::core::utils::geometry::{dha_angle, distance};
use crate::engine::config::{AnalysisConfig, HBondCriteria};
use crate::engine::counts::BondCounts;
use crate::engine::hydrogens::HydrogenResolver;
use nalgebra::Point3;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Donor and acceptor atoms of one model, each list in input order.
/// An atom with both roles appears in both.
#[derive(Debug, Default)]
pub struct RolePartition<'s> {
    pub donors: Vec<(AtomId, &'s Atom)>,
    pub acceptors: Vec<(AtomId, &'s Atom)>,
}

pub fn partition_model(structure: &Structure, model_id: ModelId) -> RolePartition<'_> {
    let mut partition = RolePartition::default();
    for (atom_id, atom) in structure.model_atoms(model_id) {
        let Some(residue) = structure.residue(atom.residue_id) else {
            continue;
        };
        let role = classify(&atom.name, &residue.name);
        if role.is_donor() {
            partition.donors.push((atom_id, atom));
        }
        if role.is_acceptor() {
            partition.acceptors.push((atom_id, atom));
        }
    }
    partition
}

fn hydrogen_satisfies(
    donor: &Point3<f64>,
    hydrogen: &Point3<f64>,
    acceptor: &Point3<f64>,
    criteria: &HBondCriteria,
    enforce_ha_distance: bool,
) -> bool {
    if enforce_ha_distance && distance(hydrogen, acceptor) > criteria.max_hydrogen_acceptor_distance
    {
        return false;
    }
    dha_angle(donor, hydrogen, acceptor) > criteria.min_dha_angle
}

/// Counts the bonds formed by a single donor against every acceptor.
///
/// Hydrogens are only resolved once the donor has at least one acceptor within
/// distance, and then at most once.
fn count_donor(
    donor_id: AtomId,
    donor: &Atom,
    acceptors: &[(AtomId, &Atom)],
    resolver: &HydrogenResolver<'_>,
    config: &AnalysisConfig,
) -> BondCounts {
    let criteria = &config.criteria;
    let mut counts = BondCounts::default();
    let mut hydrogens: Option<Vec<Point3<f64>>> = None;

    for (_, acceptor) in acceptors {
        if acceptor.residue_id == donor.residue_id {
            continue;
        }

        let da = distance(&donor.position, &acceptor.position);
        if da.is_nan() || da > criteria.max_donor_acceptor_distance {
            continue;
        }
        counts.distance_only += 1;

        let hydrogens = hydrogens.get_or_insert_with(|| resolver.resolve(donor_id));
        if hydrogens.iter().any(|h| {
            hydrogen_satisfies(
                &donor.position,
                h,
                &acceptor.position,
                criteria,
                config.enforce_hydrogen_acceptor_distance,
            )
        }) {
            counts.angle_satisfying += 1;
        }
    }

    counts
}

/// Counts hydrogen bonds between the donors and acceptors of one model.
pub fn count_model(
    structure: &Structure,
    model_id: ModelId,
    resolver: &HydrogenResolver<'_>,
    config: &AnalysisConfig,
) -> BondCounts {
    let partition = partition_model(structure, model_id);
    debug!(
        donors = partition.donors.len(),
        acceptors = partition.acceptors.len(),
        "Partitioned model atoms by hydrogen-bond role."
    );
    if partition.donors.is_empty() || partition.acceptors.is_empty() {
        return BondCounts::default();
    }

    #[cfg(not(feature = "parallel"))]
    let donor_iter = partition.donors.iter();
    #[cfg(feature = "parallel")]
    let donor_iter = partition.donors.par_iter();

    donor_iter
        .map(|&(donor_id, donor)| {
            count_donor(donor_id, donor, &partition.acceptors, resolver, config)
        })
        .sum()
}

/// Counts hydrogen bonds over every model of a structure.
///
/// Pairs are only formed within a model; the totals are summed across models.
#[instrument(skip_all, name = "hbond_count_task", fields(structure = structure.id()))]
pub fn count_structure(structure: &Structure, config: &AnalysisConfig) -> BondCounts {
    let resolver = HydrogenResolver::new(structure, config);

    let total: BondCounts = structure
        .model_ids()
        .iter()
        .map(|&model_id| count_model(structure, model_id, &resolver, config))
        .sum();

    debug_assert!(total.angle_satisfying <= total.distance_only);
    info!(
        models = structure.model_count(),
        distance_only = total.distance_only,
        angle_satisfying = total.angle_satisfying,
        "Counted hydrogen bonds."
    );
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::StructureBuilder;
    use crate::engine::config::{AnalysisConfigBuilder, HydrogenMode};

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    /// SER OG donor at the origin with one hydrogen, and an ASP OD1 acceptor.
    fn serine_aspartate(hydrogen: Point3<f64>, acceptor: Point3<f64>) -> Structure {
        let mut builder = StructureBuilder::new("pair");
        builder.start_chain('A');
        builder.start_residue(1, None, "SER");
        builder.add_atom("OG", "O", p(0.0, 0.0, 0.0));
        builder.add_atom("HG", "H", hydrogen);
        builder.start_residue(2, None, "ASP");
        builder.add_atom("OD1", "O", acceptor);
        builder.build()
    }

    #[test]
    fn linear_bond_counts_under_both_policies() {
        let structure = serine_aspartate(p(1.0, 0.0, 0.0), p(2.8, 0.0, 0.0));
        let counts = count_structure(&structure, &AnalysisConfig::default());
        assert_eq!(counts, BondCounts::new(1, 1));
    }

    #[test]
    fn acute_angle_counts_only_by_distance() {
        // Hydrogen points away from the acceptor: H-D and H-A are nearly parallel.
        let structure = serine_aspartate(p(-1.0, 0.0, 0.0), p(2.8, 0.0, 0.0));
        let counts = count_structure(&structure, &AnalysisConfig::default());
        assert_eq!(counts, BondCounts::new(1, 0));
    }

    #[test]
    fn distant_pair_is_not_counted() {
        let structure = serine_aspartate(p(1.0, 0.0, 0.0), p(4.0, 0.0, 0.0));
        let counts = count_structure(&structure, &AnalysisConfig::default());
        assert_eq!(counts, BondCounts::SENTINEL);
    }

    #[test]
    fn boundary_distance_is_inclusive() {
        let structure = serine_aspartate(p(1.0, 0.0, 0.0), p(3.5, 0.0, 0.0));
        let counts = count_structure(&structure, &AnalysisConfig::default());
        assert_eq!(counts.distance_only, 1);
    }

    #[test]
    fn donor_without_hydrogens_counts_by_distance_only() {
        let mut builder = StructureBuilder::new("noh");
        builder.start_residue(1, None, "LYS");
        builder.add_atom("NZ", "N", p(0.0, 0.0, 0.0));
        builder.start_residue(2, None, "GLU");
        builder.add_atom("OE1", "O", p(0.0, 3.0, 0.0));
        let structure = builder.build();

        let counts = count_structure(&structure, &AnalysisConfig::default());
        assert_eq!(counts, BondCounts::new(1, 0));
    }

    #[test]
    fn same_residue_pairs_are_excluded() {
        let mut builder = StructureBuilder::new("self");
        builder.start_residue(1, None, "SER");
        builder.add_atom("OG", "O", p(0.0, 0.0, 0.0));
        builder.add_atom("HG", "H", p(1.0, 0.0, 0.0));
        builder.add_atom("O", "O", p(2.5, 0.0, 0.0));
        let structure = builder.build();

        let counts = count_structure(&structure, &AnalysisConfig::default());
        assert_eq!(counts, BondCounts::SENTINEL);
    }

    #[test]
    fn hydrogen_acceptor_distance_is_enforced_when_enabled() {
        // D-A = 3.4, H-A = 2.6: passes the angle, fails the H-A cap of 2.5.
        let structure = serine_aspartate(p(0.8, 0.0, 0.0), p(3.4, 0.0, 0.0));

        let relaxed = count_structure(&structure, &AnalysisConfig::default());
        assert_eq!(relaxed, BondCounts::new(1, 1));

        let strict = AnalysisConfigBuilder::new()
            .enforce_hydrogen_acceptor_distance(true)
            .build()
            .unwrap();
        assert_eq!(count_structure(&structure, &strict), BondCounts::new(1, 0));
    }

    #[test]
    fn models_are_counted_independently_and_summed() {
        let mut builder = StructureBuilder::new("nmr");
        for serial in 1..=2 {
            builder.start_model(serial);
            builder.start_chain('A');
            builder.start_residue(1, None, "SER");
            builder.add_atom("OG", "O", p(0.0, 0.0, 0.0));
            builder.start_residue(2, None, "ASP");
            builder.add_atom("OD1", "O", p(3.0, 0.0, 0.0));
        }
        let structure = builder.build();

        let counts = count_structure(&structure, &AnalysisConfig::default());
        assert_eq!(counts, BondCounts::new(2, 0));
    }

    #[test]
    fn virtual_backbone_hydrogen_enables_angle_count() {
        let mut builder = StructureBuilder::new("helix");
        builder.start_chain('A');
        builder.start_residue(1, None, "GLY");
        builder.add_atom("CA", "C", p(-1.2, -1.5, 0.0));
        builder.add_atom("C", "C", p(-0.8, -0.6, 0.0));
        builder.start_residue(2, None, "ALA");
        builder.add_atom("N", "N", p(0.0, 0.0, 0.0));
        builder.add_atom("CA", "C", p(0.8, -0.6, 0.0));
        builder.add_atom("C", "C", p(1.5, -1.5, 0.0));
        builder.start_residue(3, None, "ASP");
        builder.add_atom("OD1", "O", p(0.0, 2.9, 0.0));
        let structure = builder.build();

        let explicit = count_structure(&structure, &AnalysisConfig::default());
        assert_eq!(explicit, BondCounts::new(1, 0));

        let config = AnalysisConfigBuilder::new()
            .hydrogen_mode(HydrogenMode::VirtualBackbone)
            .build()
            .unwrap();
        assert_eq!(count_structure(&structure, &config), BondCounts::new(1, 1));
    }

    #[test]
    fn partition_lists_dual_role_atoms_twice() {
        let mut builder = StructureBuilder::new("his");
        builder.start_residue(1, None, "HIS");
        builder.add_atom("ND1", "N", p(0.0, 0.0, 0.0));
        builder.add_atom("CB", "C", p(1.0, 0.0, 0.0));
        let structure = builder.build();

        let partition = partition_model(&structure, structure.model_ids()[0]);
        assert_eq!(partition.donors.len(), 1);
        assert_eq!(partition.acceptors.len(), 1);
    }
}
