use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes one line per item, each terminated by a newline.
pub fn write_lines<I, T>(path: &Path, lines: I) -> io::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_lines_to(&mut writer, lines)?;
    writer.flush()
}

pub fn write_lines_to<W, I, T>(writer: &mut W, lines: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = T>,
    T: Display,
{
    for line in lines {
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}
