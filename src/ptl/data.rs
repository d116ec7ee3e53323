//! Hub label storage and the textual label exchange format.
//!
//! Labels arrive as a text stream with one line per label: `o h…` carries
//! the forward labels of the current event's departure, `i h…` the
//! backward labels of its arrival and advances to the next event. Lines
//! that cannot apply at their position are skipped with a diagnostic and
//! reflected in the loader's success flag.

use std::io::{BufRead, Write};
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::TimeExpandedData;
use crate::StopEventId;

pub type Hub = u32;
pub type Label = Vec<Hub>;

/// Summary of one label side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideStats {
    pub min: usize,
    pub max: usize,
    pub total: usize,
    pub mean: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStats {
    pub forward: SideStats,
    pub backward: SideStats,
}

/// The 2-hop label set: one sorted hub sequence per departure event
/// (forward) and per arrival event (backward).
///
/// A journey from departure event `u` to arrival event `v` exists exactly
/// when the forward label of `u` and the backward label of `v` intersect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PtlData {
    te: TimeExpandedData,
    fwd_labels: Vec<Label>,
    bwd_labels: Vec<Label>,
}

impl PtlData {
    pub fn new(te: TimeExpandedData) -> Self {
        let events = te.num_events();
        PtlData {
            te,
            fwd_labels: vec![Label::new(); events],
            bwd_labels: vec![Label::new(); events],
        }
    }

    pub fn te(&self) -> &TimeExpandedData {
        &self.te
    }

    pub fn fwd_label(&self, event: StopEventId) -> &Label {
        &self.fwd_labels[event]
    }

    pub fn bwd_label(&self, event: StopEventId) -> &Label {
        &self.bwd_labels[event]
    }

    pub fn set_fwd_label(&mut self, event: StopEventId, label: Label) {
        self.fwd_labels[event] = label;
    }

    pub fn set_bwd_label(&mut self, event: StopEventId, label: Label) {
        self.bwd_labels[event] = label;
    }

    /// Empties every per-event label while keeping one (possibly empty)
    /// label slot per event.
    pub fn clear_labels(&mut self) {
        for label in &mut self.fwd_labels {
            label.clear();
        }
        for label in &mut self.bwd_labels {
            label.clear();
        }
    }

    /// Reads a label stream, skipping lines that do not apply at their
    /// position. Returns whether the stream was consumed without skips.
    pub fn read_labels<R: BufRead>(&mut self, reader: R) -> Result<bool, Error> {
        let mut clean = true;
        let mut event: StopEventId = 0;
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut chars = trimmed.chars();
            let kind = chars.next().unwrap_or_default();
            let rest = chars.as_str();
            if kind != 'o' && kind != 'i' {
                warn!("unexpected label line: {trimmed}");
                clean = false;
                continue;
            }
            let parsed: Result<Label, std::num::ParseIntError> =
                rest.split_whitespace().map(str::parse).collect();
            match parsed {
                Ok(hubs) => {
                    if event < self.te.num_events() {
                        if kind == 'o' {
                            self.fwd_labels[event] = hubs;
                        } else {
                            self.bwd_labels[event] = hubs;
                        }
                    } else {
                        warn!("label line beyond the last event: {trimmed}");
                        clean = false;
                    }
                }
                Err(error) => {
                    warn!("skipping malformed label line ({error}): {trimmed}");
                    clean = false;
                }
            }
            if kind == 'i' {
                event += 1;
            }
        }
        Ok(clean)
    }

    /// Writes the labels in the format [`read_labels`](Self::read_labels)
    /// consumes; loading then writing reproduces a canonical stream
    /// byte-identically.
    pub fn write_labels<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        for event in 0..self.te.num_events() {
            write_label_line(&mut writer, "o", &self.fwd_labels[event])?;
            write_label_line(&mut writer, "i", &self.bwd_labels[event])?;
        }
        Ok(())
    }

    pub fn label_stats(&self) -> LabelStats {
        LabelStats {
            forward: side_stats(&self.fwd_labels),
            backward: side_stats(&self.bwd_labels),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        crate::binary::save_to(self, path)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        crate::binary::load_from(path)
    }
}

fn write_label_line<W: Write>(writer: &mut W, kind: &str, label: &Label) -> Result<(), Error> {
    write!(writer, "{kind}")?;
    for hub in label {
        write!(writer, " {hub}")?;
    }
    writeln!(writer)?;
    Ok(())
}

fn side_stats(labels: &[Label]) -> SideStats {
    if labels.is_empty() {
        return SideStats {
            min: 0,
            max: 0,
            total: 0,
            mean: 0.0,
        };
    }
    let mut min = usize::MAX;
    let mut max = 0;
    let mut total = 0;
    for label in labels {
        min = min.min(label.len());
        max = max.max(label.len());
        total += label.len();
    }
    SideStats {
        min,
        max,
        total,
        mean: total as f64 / labels.len() as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimetableBuilder;

    fn te() -> TimeExpandedData {
        let mut builder = TimetableBuilder::new(2);
        builder.add_route(&[0, 1], &[vec![(0, 0), (300, 300)]]);
        TimeExpandedData::new(&builder.build().unwrap())
    }

    #[test]
    fn label_text_round_trips_byte_identically() {
        let text = "o 1 4 9\ni\no\ni 2 9\n";
        let mut data = PtlData::new(te());
        assert!(data.read_labels(text.as_bytes()).unwrap());
        assert_eq!(data.fwd_label(0), &vec![1, 4, 9]);
        assert!(data.bwd_label(0).is_empty());
        assert_eq!(data.bwd_label(1), &vec![2, 9]);

        let mut written = Vec::new();
        data.write_labels(&mut written).unwrap();
        assert_eq!(written, text.as_bytes());
    }

    #[test]
    fn offending_lines_are_skipped_and_reported() {
        let text = "o 1\nx 5\ni 2\no not-a-hub\ni 3\no 7\ni 8\n";
        let mut data = PtlData::new(te());
        let clean = data.read_labels(text.as_bytes()).unwrap();
        assert!(!clean);
        assert_eq!(data.fwd_label(0), &vec![1]);
        assert_eq!(data.bwd_label(0), &vec![2]);
        // The malformed forward line left event 1's forward label empty.
        assert!(data.fwd_label(1).is_empty());
        assert_eq!(data.bwd_label(1), &vec![3]);
    }

    #[test]
    fn clearing_keeps_one_slot_per_event() {
        let mut data = PtlData::new(te());
        data.read_labels("o 1\ni 2\no 3\ni 4\n".as_bytes()).unwrap();
        data.clear_labels();
        assert_eq!(data.te().num_events(), 2);
        for event in 0..data.te().num_events() {
            assert!(data.fwd_label(event).is_empty());
            assert!(data.bwd_label(event).is_empty());
        }
    }

    #[test]
    fn stats_summarise_both_sides() {
        let mut data = PtlData::new(te());
        data.read_labels("o 1 2\ni 3\no\ni 4 5 6\n".as_bytes())
            .unwrap();
        let stats = data.label_stats();
        assert_eq!(stats.forward.min, 0);
        assert_eq!(stats.forward.max, 2);
        assert_eq!(stats.forward.total, 2);
        assert_eq!(stats.backward.total, 4);
        assert!((stats.backward.mean - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn binary_round_trip_preserves_labels() {
        let mut data = PtlData::new(te());
        data.read_labels("o 1 2\ni 3\no\ni 4\n".as_bytes()).unwrap();
        let path = std::env::temp_dir().join("arcbus-ptl-roundtrip.bin");
        data.save(&path).unwrap();
        let loaded = PtlData::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.fwd_label(0), data.fwd_label(0));
        assert_eq!(loaded.bwd_label(1), data.bwd_label(1));
        assert_eq!(loaded.te().num_events(), 2);
    }
}
