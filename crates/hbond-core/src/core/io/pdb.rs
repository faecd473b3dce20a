use crate::core::io::traits::StructureFile;
use crate::core::models::atom::infer_element;
use crate::core::models::builder::StructureBuilder;
use crate::core::models::ids::{AtomId, ResidueId};
use crate::core::models::residue::HeteroFlag;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::collections::HashMap;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, trace};

/// Minimum line length covering the z coordinate (columns 47-54).
const MIN_ATOM_RECORD_LEN: usize = 54;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PdbMetadata {
    /// Number of ATOM/HETATM records skipped as malformed.
    pub skipped_records: usize,
    /// Number of alternate-location records folded into an atom read earlier.
    pub skipped_altlocs: usize,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error, PartialEq)]
enum RecordError {
    #[error("line is too short for an ATOM/HETATM record")]
    LineTooShort,
    #[error("atom name in columns 13-16 is empty")]
    MissingAtomName,
    #[error("invalid integer in columns {columns} (value: '{value}')")]
    InvalidInt { columns: &'static str, value: String },
    #[error("invalid float in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
    #[error("no element in columns 77-78 and none inferable from atom name")]
    UnknownElement,
}

#[derive(Debug, Clone, PartialEq)]
struct AtomRecord {
    hetero: bool,
    name: String,
    alt_loc: Option<char>,
    res_name: String,
    chain_id: char,
    res_seq: isize,
    insertion_code: Option<char>,
    position: Point3<f64>,
    occupancy: f64,
    element: String,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end.min(line.len())).unwrap_or("").trim()
}

fn column_char(line: &str, index: usize) -> Option<char> {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| !c.is_whitespace())
}

fn parse_float(line: &str, start: usize, end: usize, columns: &'static str) -> Result<f64, RecordError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| RecordError::InvalidFloat {
        columns,
        value: value.to_string(),
    })
}

fn parse_atom_record(line: &str) -> Result<AtomRecord, RecordError> {
    if line.len() < MIN_ATOM_RECORD_LEN {
        return Err(RecordError::LineTooShort);
    }

    let name = slice_and_trim(line, 12, 16);
    if name.is_empty() {
        return Err(RecordError::MissingAtomName);
    }

    let res_seq_str = slice_and_trim(line, 22, 26);
    let res_seq: isize = res_seq_str.parse().map_err(|_| RecordError::InvalidInt {
        columns: "23-26",
        value: res_seq_str.to_string(),
    })?;

    let x = parse_float(line, 30, 38, "31-38")?;
    let y = parse_float(line, 38, 46, "39-46")?;
    let z = parse_float(line, 46, 54, "47-54")?;

    let element = match slice_and_trim(line, 76, 78) {
        "" => infer_element(name).ok_or(RecordError::UnknownElement)?,
        symbol => symbol.to_ascii_uppercase(),
    };

    Ok(AtomRecord {
        hetero: line.starts_with("HETATM"),
        name: name.to_string(),
        alt_loc: column_char(line, 16),
        res_name: slice_and_trim(line, 17, 20).to_string(),
        chain_id: column_char(line, 21).unwrap_or(' '),
        res_seq,
        insertion_code: column_char(line, 26),
        position: Point3::new(x, y, z),
        occupancy: slice_and_trim(line, 54, 60).parse().unwrap_or(0.0),
        element,
    })
}

fn parse_model_serial(line: &str) -> Option<usize> {
    line.get(6..)?.trim().parse().ok()
}

pub struct PdbFile;

impl StructureFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(
        reader: &mut impl BufRead,
        id: &str,
    ) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut builder = StructureBuilder::new(id);
        let mut metadata = PdbMetadata::default();
        let mut next_model_serial = 1;

        let mut current_chain: Option<char> = None;
        let mut current_residue: Option<((HeteroFlag, isize, Option<char>), ResidueId)> = None;
        // Alternate conformers already placed, with the occupancy that won.
        let mut conformers: HashMap<(ResidueId, String), (AtomId, f64)> = HashMap::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record_type = slice_and_trim(&line, 0, 6);
            match record_type {
                "MODEL" => {
                    let serial = parse_model_serial(&line).unwrap_or(next_model_serial);
                    builder.start_model(serial);
                    next_model_serial = serial + 1;
                    current_chain = None;
                    current_residue = None;
                }
                "ENDMDL" => {
                    current_chain = None;
                    current_residue = None;
                }
                "END" => break,
                "ATOM" | "HETATM" => {
                    let record = match parse_atom_record(&line) {
                        Ok(record) => record,
                        Err(e) => {
                            debug!(line = line_num, "Skipping malformed record: {}", e);
                            metadata.skipped_records += 1;
                            continue;
                        }
                    };

                    if current_chain != Some(record.chain_id) {
                        builder.start_chain(record.chain_id);
                        current_chain = Some(record.chain_id);
                        current_residue = None;
                    }
                    let residue_key = (
                        HeteroFlag::from_record(record.hetero, &record.res_name),
                        record.res_seq,
                        record.insertion_code,
                    );
                    let open_residue = current_residue
                        .as_ref()
                        .and_then(|(key, id)| (*key == residue_key).then_some(*id));
                    let residue_id = match open_residue {
                        Some(id) => id,
                        None => {
                            let id = if record.hetero {
                                builder.start_heterogen(
                                    record.res_seq,
                                    record.insertion_code,
                                    &record.res_name,
                                )
                            } else {
                                builder.start_residue(
                                    record.res_seq,
                                    record.insertion_code,
                                    &record.res_name,
                                )
                            };
                            current_residue = Some((residue_key, id));
                            id
                        }
                    };

                    if record.alt_loc.is_none() {
                        builder.add_atom(&record.name, &record.element, record.position);
                        continue;
                    }

                    let conformer_key = (residue_id, record.name.clone());
                    match conformers.get_mut(&conformer_key) {
                        Some((atom_id, best_occupancy)) => {
                            if record.occupancy > *best_occupancy {
                                builder.relocate_atom(*atom_id, record.position);
                                *best_occupancy = record.occupancy;
                            }
                            trace!(line = line_num, "Folded alternate location into earlier atom.");
                            metadata.skipped_altlocs += 1;
                        }
                        None => {
                            if let Some(atom_id) =
                                builder.add_atom(&record.name, &record.element, record.position)
                            {
                                conformers.insert(conformer_key, (atom_id, record.occupancy));
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        let structure = builder.build();
        debug!(
            id,
            atoms = structure.atom_count(),
            models = structure.model_count(),
            skipped = metadata.skipped_records,
            "Parsed PDB structure."
        );
        Ok((structure, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(content: &str) -> (Structure, PdbMetadata) {
        PdbFile::read_from(&mut Cursor::new(content.as_bytes()), "test").unwrap()
    }

    const TWO_RESIDUES: &str = "\
HEADER    TEST
ATOM      1  N   GLY A   1      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  GLY A   1      11.639   6.071  -5.147  1.00  0.00           C
ATOM      3  H   GLY A   1      10.500   5.400  -6.800  1.00  0.00           H
ATOM      4  N   SER A   2       9.000   4.000  -4.000  1.00  0.00           N
ATOM      5  OG  SER A   2       8.000   3.000  -3.000  1.00  0.00           O
TER
END
";

    #[test]
    fn parses_atoms_residues_and_elements() {
        let (structure, metadata) = read(TWO_RESIDUES);
        assert_eq!(structure.id(), "test");
        assert_eq!(structure.model_count(), 1);
        assert_eq!(structure.atom_count(), 5);
        assert_eq!(metadata.skipped_records, 0);

        let atoms: Vec<_> = structure.atoms_iter().map(|(_, a)| a.clone()).collect();
        assert_eq!(atoms[0].name, "N");
        assert_eq!(atoms[0].element, "N");
        assert_eq!(atoms[0].position, Point3::new(11.104, 6.134, -6.504));
        assert!(atoms[2].is_hydrogen());

        let residue = structure.residue(atoms[4].residue_id).unwrap();
        assert_eq!(residue.name, "SER");
        assert_eq!(residue.number, 2);
        assert_ne!(atoms[0].residue_id, atoms[3].residue_id);
        assert_eq!(atoms[0].residue_id, atoms[1].residue_id);
    }

    #[test]
    fn infers_element_when_columns_are_missing() {
        let content = "ATOM      1 1HB  ALA A   1       1.000   2.000   3.000\n";
        let (structure, _) = read(content);
        let (_, atom) = structure.atoms_iter().next().unwrap();
        assert_eq!(atom.name, "1HB");
        assert!(atom.is_hydrogen());
    }

    #[test]
    fn malformed_records_are_skipped_and_counted() {
        let content = "\
ATOM      1  N   GLY A   1      11.104   6.134  -6.504  1.00  0.00           N
ATOM      2  CA  GLY A   1      xx.xxx   6.071  -5.147  1.00  0.00           C
ATOM      3  C   GLY A   X      11.000   6.000  -5.000  1.00  0.00           C
ATOM      4  O   GLY A   1
ATOM      5  O   GLY A   1      12.000   7.000  -5.000  1.00  0.00           O
";
        let (structure, metadata) = read(content);
        assert_eq!(structure.atom_count(), 2);
        assert_eq!(metadata.skipped_records, 3);
    }

    #[test]
    fn model_records_create_independent_models() {
        let content = "\
MODEL        1
ATOM      1  N   GLY A   1       0.000   0.000   0.000  1.00  0.00           N
ENDMDL
MODEL        2
ATOM      1  N   GLY A   1       0.100   0.000   0.000  1.00  0.00           N
ENDMDL
END
";
        let (structure, _) = read(content);
        assert_eq!(structure.model_count(), 2);
        let serials: Vec<_> = structure.models_iter().map(|(_, m)| m.serial).collect();
        assert_eq!(serials, vec![1, 2]);
        let residues: Vec<_> = structure.atoms_iter().map(|(_, a)| a.residue_id).collect();
        assert_ne!(residues[0], residues[1]);
    }

    fn only_position(structure: &Structure) -> Point3<f64> {
        let mut atoms = structure.atoms_iter();
        let (_, atom) = atoms.next().unwrap();
        assert!(atoms.next().is_none());
        atom.position
    }

    #[test]
    fn alternate_locations_tie_keeps_the_first_conformer() {
        let content = "\
ATOM      1  OG ASER A   1       1.000   0.000   0.000  0.50  0.00           O
ATOM      2  OG BSER A   1       1.500   0.000   0.000  0.50  0.00           O
";
        let (structure, metadata) = read(content);
        assert_eq!(only_position(&structure), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(metadata.skipped_altlocs, 1);
        assert_eq!(metadata.skipped_records, 0);
    }

    #[test]
    fn alternate_location_with_higher_occupancy_wins() {
        let content = "\
ATOM      1  OG ASER A   1       1.000   0.000   0.000  0.30  0.00           O
ATOM      2  OG BSER A   1       1.500   0.000   0.000  0.70  0.00           O
";
        let (structure, metadata) = read(content);
        assert_eq!(only_position(&structure), Point3::new(1.5, 0.0, 0.0));
        assert_eq!(metadata.skipped_altlocs, 1);
    }

    #[test]
    fn atom_present_only_as_a_later_altloc_is_kept() {
        let content = "\
ATOM      1  OG BSER A   2       3.000   0.000   0.000  0.60  0.00           O
";
        let (structure, metadata) = read(content);
        assert_eq!(only_position(&structure), Point3::new(3.0, 0.0, 0.0));
        assert_eq!(metadata.skipped_altlocs, 0);
    }

    #[test]
    fn hetatm_residue_is_separate_from_polymer_residue_with_same_number() {
        let content = "\
ATOM      1  N   ALA A   1       0.000   0.000   0.000  1.00  0.00           N
HETATM    2  O   HOH A   1       3.000   0.000   0.000  1.00  0.00           O
";
        let (structure, _) = read(content);
        let residues: Vec<_> = structure.atoms_iter().map(|(_, a)| a.residue_id).collect();
        assert_ne!(residues[0], residues[1]);
        let water = structure.residue(residues[1]).unwrap();
        assert_eq!(water.name, "HOH");
        assert_eq!(water.hetero, HeteroFlag::Water);
    }

    #[test]
    fn end_record_stops_reading() {
        let content = "\
ATOM      1  N   GLY A   1       0.000   0.000   0.000  1.00  0.00           N
END
ATOM      2  N   GLY A   2       1.000   0.000   0.000  1.00  0.00           N
";
        let (structure, _) = read(content);
        assert_eq!(structure.atom_count(), 1);
    }

    #[test]
    fn empty_input_is_an_empty_structure() {
        let (structure, metadata) = read("");
        assert!(structure.is_empty());
        assert_eq!(structure.model_count(), 0);
        assert_eq!(metadata, PdbMetadata::default());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = PdbFile::read_from_path("/nonexistent/path/none.pdb", "none");
        assert!(matches!(result, Err(PdbError::Io(_))));
    }
}
