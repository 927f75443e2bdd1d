use std::collections::BTreeMap;
use std::path::Path;

use crate::dtype::Sf2RangesError;

/// Parses a split soundfont filename of the form `BBB-PPP-Name.sf2`, where
/// `BBB` is the bank number and `PPP` the preset number, both exactly three
/// ASCII digits. Returns the bank, the preset and the display name.
pub fn parse_split_filename(filename: &str) -> Option<(u16, u16, &str)> {
    let stem = filename.strip_suffix(".sf2")?;
    let mut parts = stem.splitn(3, '-');
    let bank = parts.next()?;
    let preset = parts.next()?;
    let name = parts.next()?;
    if bank.len() != 3 || !bank.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if preset.len() != 3 || !preset.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if name.is_empty() {
        return None;
    }
    Some((bank.parse().ok()?, preset.parse().ok()?, name))
}

/// Scans a folder of split soundfont files and maps bank and preset numbers
/// to the matching filenames. Files that do not follow the split naming
/// scheme are skipped.
pub fn split_file_mapping(
    directory: &Path,
) -> Result<BTreeMap<u16, BTreeMap<u16, String>>, Sf2RangesError> {
    let mut mapping: BTreeMap<u16, BTreeMap<u16, String>> = BTreeMap::new();
    let pattern = directory.join("*.sf2");
    for entry in glob::glob(&pattern.to_string_lossy())? {
        match entry {
            Ok(path) => {
                if let Some(filename) = path.file_name().and_then(|name| name.to_str()) {
                    if let Some((bank, preset, _)) = parse_split_filename(filename) {
                        mapping
                            .entry(bank)
                            .or_default()
                            .insert(preset, filename.to_string());
                    } else {
                        log::debug!("Skipping {}!", path.display());
                    }
                }
            }
            Err(e) => {
                log::warn!("{:?}", e);
            }
        }
    }
    Ok(mapping)
}
