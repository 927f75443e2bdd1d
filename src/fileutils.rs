use std::fs::{File, OpenOptions};
use std::io::Seek;
use std::path::Path;

use sf2ranges::dtype::Sf2RangesError;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn open_file_overwrite_rw<P: AsRef<Path>>(path: P) -> Result<File, Sf2RangesError> {
    let mut file = OpenOptions::new().append(false).create(true).read(true).write(true).open(path)?;
    file.set_len(0)?;
    file.seek(std::io::SeekFrom::Start(0))?;
    Ok(file)
}
