use nalgebra::{Point3, Vector3};
use std::collections::HashMap;

/// Euclidean distance between two points.
pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a - b).norm()
}

/// The D-H-A angle in degrees, measured at the hydrogen between the vectors
/// pointing from the hydrogen to the donor and to the acceptor.
///
/// Returns `0.0` when either vector has zero length.
pub fn dha_angle(donor: &Point3<f64>, hydrogen: &Point3<f64>, acceptor: &Point3<f64>) -> f64 {
    let h_to_d = donor - hydrogen;
    let h_to_a = acceptor - hydrogen;

    let (Some(u), Some(v)) = (unit(&h_to_d), unit(&h_to_a)) else {
        return 0.0;
    };

    u.dot(&v).clamp(-1.0, 1.0).acos().to_degrees()
}

fn unit(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let norm = v.norm();
    if norm == 0.0 || !norm.is_finite() {
        None
    } else {
        Some(v / norm)
    }
}

/// Estimates the backbone amide hydrogen of residue `i` from its N and CA and the
/// carbonyl C of residue `i - 1`. The hydrogen lies along the bisector of the
/// CA→N and C(prev)→N directions.
pub fn calculate_hn_position(
    n_pos: &Point3<f64>,
    ca_pos: &Point3<f64>,
    prev_c_pos: &Point3<f64>,
    bond_length: f64,
) -> Option<Point3<f64>> {
    let n_ca = unit(&(ca_pos - n_pos))?;
    let n_c_prev = unit(&(prev_c_pos - n_pos))?;

    let hn_dir = unit(&-(n_ca + n_c_prev))?;

    Some(n_pos + hn_dir * bond_length)
}

/// RMSD over the atom names present in both maps; `None` when none are shared.
pub fn calculate_named_rmsd(
    reference: &HashMap<String, Point3<f64>>,
    other: &HashMap<String, Point3<f64>>,
) -> Option<f64> {
    let (sum, count) = reference
        .iter()
        .filter_map(|(name, p)| other.get(name).map(|q| (p - q).norm_squared()))
        .fold((0.0, 0usize), |(sum, count), d2| (sum + d2, count + 1));
    (count > 0).then(|| (sum / count as f64).sqrt())
}
