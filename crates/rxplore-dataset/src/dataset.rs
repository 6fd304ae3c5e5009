use std::{
    borrow::Cow,
    collections::BTreeMap,
    fs::File,
    io::{self, BufReader},
    path::Path,
};

use serde::{Serialize, Serializer, ser::SerializeMap as _};

use crate::{
    column::Column,
    error::{LoadDatasetError, WriteDatasetError},
    normalize::{DatasetNormalizer, NormalizationReport, RawRow, present},
    record::DrugRecord,
};

/// Options controlling how CSV input is read.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Where the value of a header position comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnSlot {
    Known(Column),
    Passthrough(usize),
}

/// A normalized drug side-effects table.
///
/// Holds every input row in its original order together with the original
/// header layout, so that the table can be displayed or written back with
/// all of its columns.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    slots: Vec<ColumnSlot>,
    records: Vec<DrugRecord>,
    report: NormalizationReport,
    delimiter: u8,
}

struct CsvRow<'a> {
    positions: &'a BTreeMap<Column, usize>,
    cells: &'a [Cow<'a, str>],
}

impl RawRow for CsvRow<'_> {
    fn get(&self, column: Column) -> Option<&str> {
        let idx = *self.positions.get(&column)?;
        self.cells.get(idx).map(AsRef::as_ref)
    }
}

impl Dataset {
    /// Reads and normalizes a CSV file.
    pub fn open<P>(path: P, options: &LoadOptions) -> Result<Self, LoadDatasetError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadDatasetError::Open {
            path: path.to_owned(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), options)
    }

    /// Reads and normalizes CSV data.
    ///
    /// The first record is the header row. Rows shorter than the header are
    /// accepted; their trailing cells count as missing. Invalid UTF-8 is
    /// replaced rather than rejected.
    pub fn from_reader<R>(reader: R, options: &LoadOptions) -> Result<Self, LoadDatasetError>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .byte_headers()
            .map_err(LoadDatasetError::Csv)?
            .iter()
            .map(|name| {
                String::from_utf8_lossy(name)
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .to_owned()
            })
            .collect::<Vec<_>>();
        let (slots, positions) = resolve_layout(&headers)?;

        let mut normalizer = DatasetNormalizer::new();
        let mut records = vec![];
        let mut raw = csv::ByteRecord::new();
        while reader
            .read_byte_record(&mut raw)
            .map_err(LoadDatasetError::Csv)?
        {
            let cells = raw
                .iter()
                .map(String::from_utf8_lossy)
                .collect::<Vec<_>>();
            let row = CsvRow {
                positions: &positions,
                cells: &cells,
            };
            let mut record = normalizer.normalize_row(&row);
            record.passthrough = slots
                .iter()
                .enumerate()
                .filter(|(_, slot)| matches!(slot, ColumnSlot::Passthrough(_)))
                .map(|(idx, _)| present(cells.get(idx).map(AsRef::as_ref)).map(str::to_owned))
                .collect();
            records.push(record);
        }

        let report = normalizer.finish();
        tracing::debug!(rows = report.rows, defaulted = ?report.defaulted, "normalized dataset");

        Ok(Self {
            headers,
            slots,
            records,
            report,
            delimiter: options.delimiter,
        })
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns all rows in input order.
    #[must_use]
    pub fn records(&self) -> &[DrugRecord] {
        &self.records
    }

    /// Returns the first `n` rows.
    #[must_use]
    pub fn head(&self, n: usize) -> &[DrugRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// Returns the header names in input order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the tally of defaulted cells.
    #[must_use]
    pub fn report(&self) -> &NormalizationReport {
        &self.report
    }

    /// Formats the cell of `record` under the header at `header_idx`.
    #[must_use]
    pub fn cell<'a>(&self, record: &'a DrugRecord, header_idx: usize) -> Cow<'a, str> {
        match self.slots.get(header_idx) {
            Some(ColumnSlot::Known(column)) => record.display_value(*column),
            Some(ColumnSlot::Passthrough(idx)) => Cow::Borrowed(
                record
                    .passthrough
                    .get(*idx)
                    .and_then(Option::as_deref)
                    .unwrap_or_default(),
            ),
            None => Cow::Borrowed(""),
        }
    }

    /// Returns a serializable view of `record` keyed by header name.
    #[must_use]
    pub fn row<'a>(&'a self, record: &'a DrugRecord) -> RowView<'a> {
        RowView {
            dataset: self,
            record,
        }
    }

    /// Writes the normalized table as CSV, keeping the input header order.
    pub fn write_csv<W>(&self, writer: W) -> Result<(), WriteDatasetError>
    where
        W: io::Write,
    {
        self.write_records(writer, &self.records)
    }

    /// Writes the given rows as CSV with this dataset's header layout.
    pub fn write_records<'a, W, I>(&self, writer: W, records: I) -> Result<(), WriteDatasetError>
    where
        W: io::Write,
        I: IntoIterator<Item = &'a DrugRecord>,
    {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(writer);
        writer.write_record(&self.headers)?;
        for record in records {
            let cells = (0..self.headers.len())
                .map(|idx| self.cell(record, idx))
                .collect::<Vec<_>>();
            writer.write_record(cells.iter().map(|cell| cell.as_bytes()))?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn resolve_layout(
    headers: &[String],
) -> Result<(Vec<ColumnSlot>, BTreeMap<Column, usize>), LoadDatasetError> {
    let mut positions = BTreeMap::new();
    let mut num_passthrough = 0;
    let slots = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| match Column::from_name(name) {
            // a repeated header only binds its first occurrence
            Some(column) if !positions.contains_key(&column) => {
                positions.insert(column, idx);
                ColumnSlot::Known(column)
            }
            _ => {
                num_passthrough += 1;
                ColumnSlot::Passthrough(num_passthrough - 1)
            }
        })
        .collect();

    let missing = Column::ALL
        .into_iter()
        .filter(|column| column.is_required() && !positions.contains_key(column))
        .map(|column| column.name().to_owned())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(LoadDatasetError::MissingColumns { columns: missing });
    }

    Ok((slots, positions))
}

/// Serializes one row as a map from header name to value.
///
/// Numeric columns serialize as numbers (NaN as `null`), the alcohol flag as
/// `0`, `1` or its original text, and missing untouched cells as `null`.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    dataset: &'a Dataset,
    record: &'a DrugRecord,
}

impl Serialize for RowView<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let record = self.record;
        let mut map = serializer.serialize_map(Some(self.dataset.headers.len()))?;
        for (header, slot) in self.dataset.headers.iter().zip(&self.dataset.slots) {
            match *slot {
                ColumnSlot::Known(Column::Activity) => map.serialize_entry(header, &record.activity)?,
                ColumnSlot::Known(Column::Rating) => map.serialize_entry(header, &record.rating)?,
                ColumnSlot::Known(Column::NoOfReviews) => {
                    map.serialize_entry(header, &record.no_of_reviews)?;
                }
                ColumnSlot::Known(Column::Alcohol) => map.serialize_entry(header, &record.alcohol)?,
                ColumnSlot::Known(Column::DrugName) => {
                    map.serialize_entry(header, &record.drug_name)?;
                }
                ColumnSlot::Known(Column::MedicalCondition) => {
                    map.serialize_entry(header, &record.medical_condition)?;
                }
                ColumnSlot::Known(column) => map.serialize_entry(header, &record.text(column))?,
                ColumnSlot::Passthrough(idx) => {
                    map.serialize_entry(
                        header,
                        &record.passthrough.get(idx).and_then(Option::as_deref),
                    )?;
                }
            }
        }
        map.end()
    }
}
