//! Opening the two input files.

use crate::error::{AuditError, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Fail with [`AuditError::InputMissing`] unless `path` exists.
pub fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(AuditError::InputMissing {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Open an input file for line-by-line reading.
pub fn open_input(path: &Path) -> Result<BufReader<File>> {
    ensure_exists(path)?;
    log::info!("Reading input file: {}", path.display());
    let file = File::open(path).map_err(|e| AuditError::Io(e).in_file(path))?;
    Ok(BufReader::new(file))
}

/// Line iterator that decodes each line lossily.
///
/// Bytes that are not UTF-8 become U+FFFD instead of failing the read, so only
/// real I/O errors are returned. The trailing `\n` or `\r\n` is removed.
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

/// Iterate over the lines of `reader` with [`LossyLines`].
pub fn lossy_lines<R: BufRead>(reader: R) -> LossyLines<R> {
    LossyLines {
        reader,
        buf: Vec::new(),
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.ends_with(b"\n") {
                    self.buf.pop();
                    if self.buf.ends_with(b"\r") {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
