use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use featsel::Dataset;
use ndarray::{Array1, Array2};

use crate::{DatasetError, Result};

/// Read a labelled dataset from a CSV file with `,` as separator
///
/// See [`from_reader`] for the expected layout.
pub fn from_csv<P: AsRef<Path>>(path: P, label: &str) -> Result<Dataset<f64>> {
    let file = File::open(path).map_err(csv::Error::from)?;
    from_reader(file, label, b',')
}

/// Read a labelled dataset from CSV bytes
///
/// The first row names the columns. The column called `label` becomes the target (`1` is the
/// positive class, `0` the negative), all other columns become features in the order of the
/// file. Every cell must parse as a number.
pub fn from_reader<R: Read>(csv: R, label: &str, separator: u8) -> Result<Dataset<f64>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(separator)
        .from_reader(csv);

    let header = reader.headers()?.clone();
    let label_idx = header
        .iter()
        .position(|name| name.trim() == label)
        .ok_or_else(|| DatasetError::MissingLabel(label.to_string()))?;

    let feature_names = header
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != label_idx)
        .map(|(_, name)| name.trim().to_string())
        .collect::<Vec<_>>();

    let mut values = Vec::new();
    let mut targets = Vec::new();
    let mut nrows = 0;

    for (row, record) in reader.records().enumerate() {
        let record = record?;

        for (idx, cell) in record.iter().enumerate() {
            if idx == label_idx {
                targets.push(parse_label(row, cell)?);
            } else {
                values.push(parse_cell(&header, row, idx, cell)?);
            }
        }
        nrows += 1;
    }

    let records = Array2::from_shape_vec((nrows, feature_names.len()), values)
        .map_err(featsel::Error::from)?;

    let dataset = Dataset::new(records, Array1::from(targets))?.with_feature_names(feature_names)?;

    Ok(dataset)
}

fn parse_cell(header: &StringRecord, row: usize, idx: usize, cell: &str) -> Result<f64> {
    cell.trim().parse().map_err(|_| DatasetError::Parse {
        row,
        column: header.get(idx).unwrap_or_default().to_string(),
        value: cell.to_string(),
    })
}

fn parse_label(row: usize, cell: &str) -> Result<bool> {
    let invalid = || DatasetError::InvalidLabel {
        row,
        value: cell.to_string(),
    };

    match cell.trim().parse::<f64>() {
        Ok(x) if x == 0.0 => Ok(false),
        Ok(x) if x == 1.0 => Ok(true),
        _ => Err(invalid()),
    }
}
