use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

use crate::errors::{MexError, Result};

///
/// Get a reader for either a gzip'd or non-gzip'd file, picked by the `.gz`
/// extension.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

/// Locate a required export file inside `dir`.
///
/// When `allow_gz` is set the gzipped variant is preferred, falling back to
/// the plain name. A file that exists under neither name is a
/// [`MexError::MissingInputFile`].
pub fn find_input_file(dir: &Path, name: &str, allow_gz: bool) -> Result<PathBuf> {
    if allow_gz {
        let gz = dir.join(format!("{name}.gz"));
        if gz.is_file() {
            return Ok(gz);
        }
    }
    let plain = dir.join(name);
    if plain.is_file() {
        return Ok(plain);
    }
    Err(MexError::MissingInputFile(plain))
}
