//! Opaque binary persistence for the crate's own artifacts.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::Error;

pub(crate) fn save_to<T: Serialize>(value: &T, path: &Path) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serde::encode_into_std_write(value, &mut writer, bincode::config::standard())?;
    Ok(())
}

pub(crate) fn load_from<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut bytes = Vec::new();
    std::io::Read::read_to_end(&mut reader, &mut bytes)?;
    let (value, _) = bincode::serde::decode_from_slice(&bytes, bincode::config::standard())?;
    Ok(value)
}
