use std::collections::BTreeSet;
use std::io::Write;

use serde::Serialize;

use crate::dtype::Sf2RangesError;
use crate::ranges::{InstrumentCoverage, NoteRange, PresetCoverage};

/// Inclusive bounds of a key or velocity interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub min: u8,
    pub max: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneReport {
    #[serde(rename = "keyRange")]
    pub key_range: Bounds,
    #[serde(rename = "velRange")]
    pub vel_range: Bounds,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentReport {
    pub name: String,
    pub zones: Vec<ZoneReport>,
    #[serde(rename = "overallKeyRange")]
    pub overall_key_range: Bounds,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetReport {
    pub bank: u16,
    pub preset: u16,
    pub name: String,
    pub instruments: Vec<InstrumentReport>,
}

/// Root of the JSON range report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeReport {
    pub presets: Vec<PresetReport>,
}

/// Aggregates the distinct key pairs of an instrument's zones.
///
/// The pairs are ordered by (min, max); the overall minimum comes from the
/// first pair and the overall maximum from the last pair. The last pair is
/// the one with the largest minimum, not necessarily the widest, so a wide
/// zone with a low minimum never supplies the maximum. An instrument
/// without zones reports the full range.
pub fn overall_key_range(zones: &[NoteRange]) -> Bounds {
    let key_pairs: BTreeSet<(u8, u8)> = zones
        .iter()
        .map(|range| (range.min_key, range.max_key))
        .collect();
    match (key_pairs.first(), key_pairs.last()) {
        (Some(&(min, _)), Some(&(_, max))) => Bounds { min, max },
        _ => Bounds { min: 0, max: 127 },
    }
}

impl ZoneReport {
    fn from_range(range: &NoteRange) -> ZoneReport {
        ZoneReport {
            key_range: Bounds {
                min: range.min_key,
                max: range.max_key,
            },
            vel_range: Bounds {
                min: range.min_vel,
                max: range.max_vel,
            },
        }
    }
}

impl InstrumentReport {
    fn from_coverage(coverage: &InstrumentCoverage) -> InstrumentReport {
        InstrumentReport {
            name: coverage.name.to_string(),
            zones: coverage.zones.iter().map(ZoneReport::from_range).collect(),
            overall_key_range: overall_key_range(&coverage.zones),
        }
    }
}

impl PresetReport {
    fn from_coverage(coverage: &PresetCoverage) -> PresetReport {
        PresetReport {
            bank: coverage.bank,
            preset: coverage.preset,
            name: coverage.name.to_string(),
            instruments: coverage
                .instruments
                .iter()
                .map(InstrumentReport::from_coverage)
                .collect(),
        }
    }
}

impl RangeReport {
    /// Builds the document tree from the resolver's coverage sequence, one
    /// preset object per record, in encounter order.
    pub fn from_coverage<'a, I>(coverage: I) -> RangeReport
    where
        I: IntoIterator<Item = PresetCoverage<'a>>,
    {
        RangeReport {
            presets: coverage
                .into_iter()
                .map(|preset| PresetReport::from_coverage(&preset))
                .collect(),
        }
    }

    /// Writes the report as pretty-printed JSON to the given sink.
    pub fn write_pretty<W: Write>(&self, writer: &mut W) -> Result<(), Sf2RangesError> {
        write_pretty_json(writer, self)
    }
}

/// Writes any serializable value as 2-space-indented JSON followed by a
/// trailing newline.
pub fn write_pretty_json<W, T>(writer: &mut W, value: &T) -> Result<(), Sf2RangesError>
where
    W: Write,
    T: ?Sized + Serialize,
{
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}
