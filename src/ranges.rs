use std::collections::BTreeMap;

use soundfont::data::GeneratorType;
use soundfont::{Instrument, Preset, Zone};

/// Effective key and velocity window of a single instrument zone.
///
/// A zone that carries no explicit range generator covers the full
/// `0..=127` span, which is what the field defaults encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteRange {
    pub min_key: u8,
    pub max_key: u8,
    pub min_vel: u8,
    pub max_vel: u8,
}

impl Default for NoteRange {
    fn default() -> NoteRange {
        NoteRange {
            min_key: 0,
            max_key: 127,
            min_vel: 0,
            max_vel: 127,
        }
    }
}

/// Resolved coverage of one instrument as referenced by one preset zone.
///
/// Two preset zones pointing at the same instrument index produce two
/// separate records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstrumentCoverage<'a> {
    pub name: &'a str,
    /// One entry per instrument zone, in stored order.
    pub zones: Vec<NoteRange>,
}

/// Coverage contributed by every instrument-referencing zone of one preset.
///
/// A preset whose zones are all global still yields a record, with an empty
/// instrument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetCoverage<'a> {
    pub bank: u16,
    pub preset: u16,
    pub name: &'a str,
    pub instruments: Vec<InstrumentCoverage<'a>>,
}

/// Groups the soundfont's flat preset list into ordered bank and preset
/// number maps. When two presets carry the same bank and preset number, the
/// first one encountered is kept.
pub fn presets_by_bank(presets: &[Preset]) -> BTreeMap<u16, BTreeMap<u16, &Preset>> {
    let mut banks: BTreeMap<u16, BTreeMap<u16, &Preset>> = BTreeMap::new();
    for preset in presets {
        banks
            .entry(preset.header.bank)
            .or_default()
            .entry(preset.header.preset)
            .or_insert(preset);
    }
    banks
}

/// Computes the effective note range of a single instrument zone.
///
/// The generator list is folded front to back with no early exit; when a
/// range generator repeats within the zone, the last occurrence overwrites
/// the earlier ones. Byte values outside the nominal `0..=127` domain are
/// kept as-is.
pub fn resolve_zone_range(zone: &Zone) -> NoteRange {
    zone.gen_list.iter().fold(NoteRange::default(), |mut range, gen| {
        match gen.ty {
            GeneratorType::KeyRange => {
                if let Some(bounds) = gen.amount.as_range() {
                    range.min_key = bounds.low;
                    range.max_key = bounds.high;
                }
            }
            GeneratorType::VelRange => {
                if let Some(bounds) = gen.amount.as_range() {
                    range.min_vel = bounds.low;
                    range.max_vel = bounds.high;
                }
            }
            _ => {}
        }
        range
    })
}

/// Walks every preset in ascending bank and preset number order and yields
/// one coverage record per preset. The iterator only borrows the model; a
/// fresh traversal can be obtained at any time by calling this again.
pub fn preset_coverages<'a>(
    banks: &'a BTreeMap<u16, BTreeMap<u16, &'a Preset>>,
    instruments: &'a [Instrument],
) -> impl Iterator<Item = PresetCoverage<'a>> + 'a {
    banks.iter().flat_map(move |(&bank, presets)| {
        presets.iter().map(move |(&preset_no, &preset)| PresetCoverage {
            bank,
            preset: preset_no,
            name: &preset.header.name,
            instruments: instrument_coverages(preset, instruments),
        })
    })
}

fn instrument_coverages<'a>(
    preset: &'a Preset,
    instruments: &'a [Instrument],
) -> Vec<InstrumentCoverage<'a>> {
    let mut coverages = Vec::new();
    for (i, preset_zone) in preset.zones.iter().enumerate() {
        if let Some(&instrument_i) = preset_zone.instrument() {
            let instrument = &instruments[instrument_i as usize];
            coverages.push(InstrumentCoverage {
                name: &instrument.header.name,
                zones: instrument.zones.iter().map(resolve_zone_range).collect(),
            });
        } else if i == 0 {
            log::debug!("Global preset zone detected in preset '{}'!", preset.header.name);
        } else {
            log::warn!(
                "Zone {} of preset '{}' contains no instrument!",
                i,
                preset.header.name
            );
        }
    }
    coverages
}

#[cfg(test)]
mod tests {
    use super::*;
    use soundfont::data::{
        Generator, GeneratorAmount, GeneratorAmountRange, InstrumentHeader, PresetHeader,
    };

    fn key_range(low: u8, high: u8) -> Generator {
        Generator {
            ty: GeneratorType::KeyRange,
            amount: GeneratorAmount::Range(GeneratorAmountRange { low, high }),
        }
    }

    fn vel_range(low: u8, high: u8) -> Generator {
        Generator {
            ty: GeneratorType::VelRange,
            amount: GeneratorAmount::Range(GeneratorAmountRange { low, high }),
        }
    }

    fn instrument_ref(index: u16) -> Generator {
        Generator {
            ty: GeneratorType::Instrument,
            amount: GeneratorAmount::U16(index),
        }
    }

    fn zone(gen_list: Vec<Generator>) -> Zone {
        Zone {
            mod_list: Vec::new(),
            gen_list,
        }
    }

    fn preset(bank: u16, preset: u16, name: &str, zones: Vec<Zone>) -> Preset {
        Preset {
            header: PresetHeader {
                name: name.to_string(),
                preset,
                bank,
                bag_id: 0,
                library: 0,
                genre: 0,
                morphology: 0,
            },
            zones,
        }
    }

    fn instrument(name: &str, zones: Vec<Zone>) -> Instrument {
        Instrument {
            header: InstrumentHeader {
                name: name.to_string(),
                bag_id: 0,
            },
            zones,
        }
    }

    #[test]
    fn zone_without_generators_covers_full_range() {
        let resolved = resolve_zone_range(&zone(vec![]));
        assert_eq!(
            resolved,
            NoteRange {
                min_key: 0,
                max_key: 127,
                min_vel: 0,
                max_vel: 127
            }
        );
    }

    #[test]
    fn key_range_generator_leaves_velocity_at_default() {
        let resolved = resolve_zone_range(&zone(vec![key_range(36, 96)]));
        assert_eq!(
            resolved,
            NoteRange {
                min_key: 36,
                max_key: 96,
                min_vel: 0,
                max_vel: 127
            }
        );
    }

    #[test]
    fn repeated_range_generator_keeps_last_occurrence() {
        let resolved = resolve_zone_range(&zone(vec![
            key_range(10, 20),
            vel_range(5, 99),
            key_range(30, 40),
        ]));
        assert_eq!(
            resolved,
            NoteRange {
                min_key: 30,
                max_key: 40,
                min_vel: 5,
                max_vel: 99
            }
        );
    }

    #[test]
    fn unrelated_generators_are_ignored() {
        let resolved = resolve_zone_range(&zone(vec![
            Generator {
                ty: GeneratorType::Pan,
                amount: GeneratorAmount::I16(-250),
            },
            key_range(12, 24),
            Generator {
                ty: GeneratorType::InitialAttenuation,
                amount: GeneratorAmount::I16(60),
            },
        ]));
        assert_eq!(resolved.min_key, 12);
        assert_eq!(resolved.max_key, 24);
        assert_eq!((resolved.min_vel, resolved.max_vel), (0, 127));
    }

    #[test]
    fn out_of_domain_bytes_pass_through() {
        let resolved = resolve_zone_range(&zone(vec![key_range(0, 200)]));
        assert_eq!(resolved.max_key, 200);
    }

    #[test]
    fn presets_iterate_in_ascending_bank_and_preset_order() {
        let presets = vec![
            preset(1, 0, "C", vec![]),
            preset(0, 5, "B", vec![]),
            preset(0, 2, "A", vec![]),
        ];
        let banks = presets_by_bank(&presets);
        let order: Vec<(u16, u16)> = preset_coverages(&banks, &[])
            .map(|coverage| (coverage.bank, coverage.preset))
            .collect();
        assert_eq!(order, vec![(0, 2), (0, 5), (1, 0)]);
    }

    #[test]
    fn duplicate_bank_and_preset_number_keeps_first() {
        let presets = vec![
            preset(0, 0, "First", vec![]),
            preset(0, 0, "Second", vec![]),
        ];
        let banks = presets_by_bank(&presets);
        let names: Vec<&str> = preset_coverages(&banks, &[])
            .map(|coverage| coverage.name)
            .collect();
        assert_eq!(names, vec!["First"]);
    }

    #[test]
    fn global_preset_zone_is_skipped() {
        let presets = vec![preset(
            0,
            0,
            "Piano",
            vec![zone(vec![key_range(0, 127)]), zone(vec![instrument_ref(0)])],
        )];
        let instruments = vec![instrument("Keys", vec![zone(vec![key_range(21, 108)])])];
        let banks = presets_by_bank(&presets);
        let coverage: Vec<PresetCoverage> = preset_coverages(&banks, &instruments).collect();
        assert_eq!(coverage.len(), 1);
        assert_eq!(coverage[0].instruments.len(), 1);
        assert_eq!(coverage[0].instruments[0].name, "Keys");
    }

    #[test]
    fn preset_with_only_global_zones_yields_empty_instrument_list() {
        let presets = vec![preset(0, 0, "Empty", vec![zone(vec![])])];
        let banks = presets_by_bank(&presets);
        let coverage: Vec<PresetCoverage> = preset_coverages(&banks, &[]).collect();
        assert_eq!(coverage.len(), 1);
        assert!(coverage[0].instruments.is_empty());
    }

    #[test]
    fn instrument_without_zones_yields_empty_zone_list() {
        let presets = vec![preset(0, 0, "Hollow", vec![zone(vec![instrument_ref(0)])])];
        let instruments = vec![instrument("NoZones", vec![])];
        let banks = presets_by_bank(&presets);
        let coverage: Vec<PresetCoverage> = preset_coverages(&banks, &instruments).collect();
        assert_eq!(coverage[0].instruments.len(), 1);
        assert!(coverage[0].instruments[0].zones.is_empty());
    }

    #[test]
    fn same_instrument_referenced_twice_yields_two_records() {
        let presets = vec![preset(
            0,
            0,
            "Layered",
            vec![zone(vec![instrument_ref(0)]), zone(vec![instrument_ref(0)])],
        )];
        let instruments = vec![instrument("Shared", vec![zone(vec![])])];
        let banks = presets_by_bank(&presets);
        let coverage: Vec<PresetCoverage> = preset_coverages(&banks, &instruments).collect();
        assert_eq!(coverage[0].instruments.len(), 2);
        assert_eq!(coverage[0].instruments[0], coverage[0].instruments[1]);
    }
}
