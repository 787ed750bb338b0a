//! Voxel classification tables.
//!
//! A classification table maps integer labels (a truncated sample value) to a
//! color, an opacity and a scalar intensity. Tables are parsed once from
//! tab-separated text and then shared read-only through an [`Arc`].
//!
//! Source rows have seven columns:
//!
//! ```text
//! label<TAB>name<TAB>R<TAB>G<TAB>B<TAB>A<TAB>intensity
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex, OnceLock};

use crate::error::{Result, VolumeError};

/// Label reserved for background voxels.
pub const BACKGROUND_LABEL: i32 = 0;

const COLUMN_COUNT: usize = 7;

/// Classification of a single label.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRecord {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    /// Human readable name of the label.
    pub label: String,
    /// Scalar value written to data textures for this label.
    pub intensity: f32,
}

impl ClassificationRecord {
    /// Fully transparent black background record.
    pub fn background() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
            label: "Unknown".to_string(),
            intensity: 0.0,
        }
    }

    /// Returns the color and opacity as RGBA bytes.
    pub fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Immutable mapping from label to [`ClassificationRecord`].
///
/// Always contains a background entry for label 0, whose opacity is zero.
#[derive(Debug, Clone)]
pub struct ClassificationTable {
    records: HashMap<i32, ClassificationRecord>,
}

impl ClassificationTable {
    /// Builds a table from records, normalizing the background entry.
    pub fn from_records(records: impl IntoIterator<Item = (i32, ClassificationRecord)>) -> Self {
        let mut records: HashMap<i32, ClassificationRecord> = records.into_iter().collect();
        records
            .entry(BACKGROUND_LABEL)
            .or_insert_with(ClassificationRecord::background)
            .a = 0;
        Self { records }
    }

    /// Parses a table from tab-separated text.
    ///
    /// Lines starting with `#` are comments and trailing empty lines are
    /// ignored. Any malformed row fails the whole table.
    pub fn parse(source: &str) -> Result<Self> {
        let lines: Vec<&str> = source.lines().collect();
        let end = lines
            .iter()
            .rposition(|line| !line.trim().is_empty())
            .map_or(0, |i| i + 1);

        let mut records = HashMap::new();
        for (i, line) in lines[..end].iter().enumerate() {
            if line.starts_with('#') {
                continue;
            }
            let (label, record) = parse_row(line, i + 1)?;
            if let Some(previous) = records.insert(label, record) {
                log::debug!(
                    "classification label {} ('{}') redefined on line {}",
                    label,
                    previous.label,
                    i + 1
                );
            }
        }

        if records.is_empty() {
            return Err(VolumeError::EmptyTable);
        }
        log::debug!("parsed classification table with {} labels", records.len());
        Ok(Self::from_records(records))
    }

    /// Reads and parses a table file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&text)
    }

    /// Returns the record for `label`, if present.
    pub fn get(&self, label: i32) -> Option<&ClassificationRecord> {
        self.records.get(&label)
    }

    /// Returns the record for `label`, or the background record when absent.
    pub fn get_or_background(&self, label: i32) -> &ClassificationRecord {
        self.records
            .get(&label)
            .unwrap_or_else(|| self.background())
    }

    /// Returns the background record.
    pub fn background(&self) -> &ClassificationRecord {
        &self.records[&BACKGROUND_LABEL]
    }

    /// Returns true if `label` has its own entry.
    pub fn contains(&self, label: i32) -> bool {
        self.records.contains_key(&label)
    }

    /// Returns the number of labels, including background.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false: a table holds at least the background label.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over all labels and records in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &ClassificationRecord)> {
        self.records.iter().map(|(&label, record)| (label, record))
    }
}

/// Truncates a sample value to its classification label.
///
/// Values outside the `i32` range saturate and NaN maps to background.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub fn label_of(sample: f32) -> i32 {
    sample as i32
}

fn parse_row(line: &str, line_no: usize) -> Result<(i32, ClassificationRecord)> {
    let columns: Vec<&str> = line.trim_end_matches('\r').split('\t').collect();
    if columns.len() < COLUMN_COUNT {
        return Err(VolumeError::MissingColumn {
            line: line_no,
            expected: COLUMN_COUNT,
            found: columns.len(),
        });
    }

    let label = parse_column(columns[0], "label", line_no)?;
    let record = ClassificationRecord {
        label: columns[1].trim().to_string(),
        r: parse_column(columns[2], "red", line_no)?,
        g: parse_column(columns[3], "green", line_no)?,
        b: parse_column(columns[4], "blue", line_no)?,
        a: parse_column(columns[5], "alpha", line_no)?,
        intensity: parse_column(columns[6], "intensity", line_no)?,
    };
    Ok((label, record))
}

fn parse_column<T: FromStr>(value: &str, column: &'static str, line: usize) -> Result<T> {
    value.trim().parse().map_err(|_| VolumeError::TableParse {
        line,
        column,
        value: value.to_string(),
    })
}

/// One-time initialization cell for a process-wide table.
///
/// The first successful [`SharedTable::get_or_load`] publishes the table;
/// concurrent callers wait for it and receive the same [`Arc`]. A failed load
/// publishes nothing, so a later call may retry.
#[derive(Debug, Default)]
pub struct SharedTable {
    table: OnceLock<Arc<ClassificationTable>>,
    init: Mutex<()>,
}

impl SharedTable {
    /// Creates an empty cell.
    pub const fn new() -> Self {
        Self {
            table: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// Returns the table, building it with `load` if no table has been published.
    pub fn get_or_load<F>(&self, load: F) -> Result<Arc<ClassificationTable>>
    where
        F: FnOnce() -> Result<ClassificationTable>,
    {
        if let Some(table) = self.table.get() {
            return Ok(Arc::clone(table));
        }

        let _guard = self
            .init
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(table) = self.table.get() {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(load()?);
        let _ = self.table.set(Arc::clone(&table));
        Ok(table)
    }

    /// Returns the published table, if any.
    pub fn get(&self) -> Option<Arc<ClassificationTable>> {
        self.table.get().cloned()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    const SAMPLE: &str = "0\tUnknown\t0\t0\t0\t255\t0\n\
                          2\tLeft-Cerebral-White-Matter\t245\t245\t245\t255\t0.8\n\
                          3\tLeft-Cerebral-Cortex\t205\t62\t78\t255\t0.4\n";

    #[test]
    fn test_parse_sample() {
        let table = ClassificationTable::parse(SAMPLE).unwrap();
        assert_eq!(table.len(), 3);

        let cortex = table.get(3).unwrap();
        assert_eq!(cortex.label, "Left-Cerebral-Cortex");
        assert_eq!(cortex.rgba(), [205, 62, 78, 255]);
        assert_eq!(cortex.intensity, 0.4);
    }

    #[test]
    fn test_iter_visits_every_label() {
        let table = ClassificationTable::parse(SAMPLE).unwrap();
        let mut labels: Vec<i32> = table.iter().map(|(label, _)| label).collect();
        labels.sort_unstable();
        assert_eq!(labels, vec![0, 2, 3]);
        assert!(table
            .iter()
            .all(|(label, record)| table.get(label) == Some(record)));
    }

    #[test]
    fn test_background_opacity_forced_to_zero() {
        let table = ClassificationTable::parse(SAMPLE).unwrap();
        assert_eq!(table.background().a, 0);
        assert_eq!(table.background().label, "Unknown");
    }

    #[test]
    fn test_background_inserted_when_missing() {
        let table = ClassificationTable::parse("5\tFive\t1\t2\t3\t4\t5.0").unwrap();
        assert!(table.contains(BACKGROUND_LABEL));
        assert_eq!(table.background(), &ClassificationRecord::background());
    }

    #[test]
    fn test_missing_label_falls_back() {
        let table = ClassificationTable::parse(SAMPLE).unwrap();
        assert!(table.get(999).is_none());
        assert_eq!(table.get_or_background(999), table.background());
    }

    #[test]
    fn test_comments_and_crlf() {
        let source = "# label\tname\tR\tG\tB\tA\tintensity\r\n7\tSeven\t1\t1\t1\t1\t0.5\r\n\r\n";
        let table = ClassificationTable::parse(source).unwrap();
        assert_eq!(table.get(7).unwrap().label, "Seven");
    }

    #[test]
    fn test_malformed_numeric_fails() {
        let source = "0\tUnknown\t0\t0\t0\t0\t0\n4\tBad\tred\t0\t0\t0\t0\n";
        let err = ClassificationTable::parse(source).unwrap_err();
        match err {
            VolumeError::TableParse {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, "red");
                assert_eq!(value, "red");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_channel_out_of_range_fails() {
        let err = ClassificationTable::parse("1\tOne\t256\t0\t0\t0\t0").unwrap_err();
        assert!(matches!(err, VolumeError::TableParse { column: "red", .. }));
    }

    #[test]
    fn test_short_row_fails() {
        let err = ClassificationTable::parse("1\tOne\t0\t0").unwrap_err();
        assert!(matches!(
            err,
            VolumeError::MissingColumn {
                line: 1,
                expected: 7,
                found: 4
            }
        ));
    }

    #[test]
    fn test_interior_blank_line_fails() {
        let source = "1\tOne\t0\t0\t0\t0\t0\n\n2\tTwo\t0\t0\t0\t0\t0\n";
        assert!(ClassificationTable::parse(source).is_err());
    }

    #[test]
    fn test_empty_source_fails() {
        assert!(matches!(
            ClassificationTable::parse("\n\n"),
            Err(VolumeError::EmptyTable)
        ));
    }

    #[test]
    fn test_duplicate_label_keeps_last() {
        let source = "1\tFirst\t0\t0\t0\t0\t1\n1\tSecond\t0\t0\t0\t0\t2\n";
        let table = ClassificationTable::parse(source).unwrap();
        assert_eq!(table.get(1).unwrap().label, "Second");
    }

    #[test]
    fn test_label_of_truncates() {
        assert_eq!(label_of(3.9), 3);
        assert_eq!(label_of(-1.5), -1);
        assert_eq!(label_of(f32::NAN), 0);
        assert_eq!(label_of(1e20), i32::MAX);
    }

    #[test]
    fn test_shared_table_loads_once() {
        let shared = SharedTable::new();
        let loads = AtomicUsize::new(0);

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    let table = shared
                        .get_or_load(|| {
                            loads.fetch_add(1, Ordering::SeqCst);
                            ClassificationTable::parse(SAMPLE)
                        })
                        .unwrap();
                    assert_eq!(table.len(), 3);
                });
            }
        });

        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shared_table_failed_load_publishes_nothing() {
        let shared = SharedTable::new();
        assert!(shared
            .get_or_load(|| ClassificationTable::parse("1\tx"))
            .is_err());
        assert!(shared.get().is_none());

        let table = shared
            .get_or_load(|| ClassificationTable::parse(SAMPLE))
            .unwrap();
        assert!(Arc::ptr_eq(&table, &shared.get().unwrap()));
    }
}
