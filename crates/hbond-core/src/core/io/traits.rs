use crate::core::models::structure::Structure;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// A coordinate file format that can be loaded into a [`Structure`].
///
/// Parsers return whatever header information the format carries alongside
/// the structure itself.
pub trait StructureFile {
    /// Header records kept from the file.
    type Metadata;

    type Error: Error + From<io::Error>;

    /// Reads a structure from a buffered reader, tagging it with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reader fails.
    fn read_from(
        reader: &mut impl BufRead,
        id: &str,
    ) -> Result<(Structure, Self::Metadata), Self::Error>;

    /// Opens `path` and parses it with [`StructureFile::read_from`].
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        id: &str,
    ) -> Result<(Structure, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, id)
    }
}
