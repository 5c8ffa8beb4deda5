use std::io;
use std::path::Path;

use thiserror::Error;

use super::model::{ColumnMap, Record, RecordTable};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a load failed. Both variants are fatal for the load attempt; the UI
/// shows them as a status message and keeps the previous dataset (if any).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{0}")]
    Parse(String),
}

impl From<csv::Error> for LoadError {
    fn from(e: csv::Error) -> Self {
        LoadError::Parse(format!("malformed CSV: {e}"))
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a billionaires table from a delimited file.
///
/// Column binding, in priority order:
/// 1. a `columns.json` sidecar next to the data file,
/// 2. header auto-detection over known aliases,
/// 3. the caller's fallback map.
pub fn load_file(path: &Path, fallback: &ColumnMap) -> Result<RecordTable, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let sidecar = read_sidecar(path)?;
    read_table(file, sidecar.as_ref().unwrap_or(fallback), sidecar.is_some())
}

/// Parse CSV from any reader. `mapping_is_explicit` disables header
/// auto-detection so a sidecar mapping is honoured verbatim.
pub fn read_table<R: io::Read>(
    input: R,
    columns: &ColumnMap,
    mapping_is_explicit: bool,
) -> Result<RecordTable, LoadError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let columns = if mapping_is_explicit {
        columns.clone()
    } else {
        ColumnMap::detect(&headers).unwrap_or_else(|| columns.clone())
    };

    let col_idx = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::Parse(format!("CSV missing '{name}' column")))
    };
    let country_idx = col_idx(&columns.country)?;
    let industry_idx = col_idx(&columns.industry)?;
    let gender_idx = col_idx(&columns.gender)?;
    let wealth_idx = col_idx(&columns.wealth)?;

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record =
            result.map_err(|e| LoadError::Parse(format!("CSV row {row_no}: {e}")))?;

        records.push(Record {
            country: categorical_cell(record.get(country_idx)),
            industry: categorical_cell(record.get(industry_idx)),
            gender: categorical_cell(record.get(gender_idx)),
            wealth: coerce_numeric(record.get(wealth_idx)),
        });
    }

    Ok(RecordTable::from_records(records))
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Empty or missing categorical cells become `None`.
fn categorical_cell(cell: Option<&str>) -> Option<String> {
    match cell.map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(s.to_string()),
    }
}

/// Coerce a wealth cell to `f64`. Anything unparseable becomes `None`
/// rather than an error, matching numeric coercion with null on failure.
/// A literal `nan`/`NaN` cell parses, but it is the missing-value marker,
/// not a number the aggregates may see.
fn coerce_numeric(cell: Option<&str>) -> Option<f64> {
    cell.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| !v.is_nan())
}

// ---------------------------------------------------------------------------
// Sidecar mapping
// ---------------------------------------------------------------------------

/// Look for `columns.json` in the data file's directory. Absent sidecar is
/// fine; a present-but-malformed one is a parse failure.
fn read_sidecar(data_path: &Path) -> Result<Option<ColumnMap>, LoadError> {
    let sidecar = match data_path.parent() {
        Some(dir) => dir.join("columns.json"),
        None => return Ok(None),
    };
    if !sidecar.exists() {
        return Ok(None);
    }

    let text = std::fs::read_to_string(&sidecar).map_err(|e| LoadError::Io {
        path: sidecar.display().to_string(),
        source: e,
    })?;
    let map: ColumnMap = serde_json::from_str(&text)
        .map_err(|e| LoadError::Parse(format!("invalid columns.json: {e}")))?;
    log::info!("Using column mapping from {}", sidecar.display());
    Ok(Some(map))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_str(csv: &str) -> RecordTable {
        read_table(csv.as_bytes(), &ColumnMap::default(), false).unwrap()
    }

    #[test]
    fn wealth_coercion_turns_garbage_into_null() {
        let table = load_str(
            "country_of_residence,industry,gender,wealth\n\
             US,Tech,M,5.2\n\
             DE,Finance,F,abc\n\
             FR,Retail,M,3\n",
        );
        let wealth: Vec<Option<f64>> = table.records.iter().map(|r| r.wealth).collect();
        assert_eq!(wealth, vec![Some(5.2), None, Some(3.0)]);
    }

    #[test]
    fn nan_cells_are_nulls_not_numbers() {
        let table = load_str(
            "country_of_residence,industry,gender,wealth\n\
             US,Tech,M,1.0\n\
             DE,Finance,F,nan\n\
             FR,Retail,M,3.0\n",
        );
        assert_eq!(table.records[1].wealth, None);

        // Null wealth must stay out of the aggregates instead of turning
        // the headline metrics into NaN.
        let idx: Vec<usize> = (0..table.len()).collect();
        assert_eq!(crate::data::aggregate::sum_wealth(&table, &idx), 4.0);
        assert_eq!(
            crate::data::aggregate::mean_wealth(&table, &idx).unwrap(),
            2.0
        );
    }

    #[test]
    fn empty_cells_become_none() {
        let table = load_str(
            "country_of_residence,industry,gender,wealth\n\
             US,Tech,M,1.0\n\
             ,Tech,,2.0\n",
        );
        assert_eq!(table.records[1].country, None);
        assert_eq!(table.records[1].gender, None);
        // Null categoricals stay out of the option lists.
        assert_eq!(table.countries, vec!["US"]);
    }

    #[test]
    fn alternate_headers_are_detected() {
        let table = read_table(
            "country,industry,gender,netWorth\nUS,Tech,M,4.5\n".as_bytes(),
            &ColumnMap::default(),
            false,
        )
        .unwrap();
        assert_eq!(table.records[0].country.as_deref(), Some("US"));
        assert_eq!(table.records[0].wealth, Some(4.5));
    }

    #[test]
    fn missing_mapped_column_is_a_parse_error() {
        let err = read_table(
            "country_of_residence,industry,gender\nUS,Tech,M\n".as_bytes(),
            &ColumnMap::default(),
            true,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(
            Path::new("/nonexistent/billionaires.csv"),
            &ColumnMap::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn ragged_rows_are_a_parse_error() {
        let err = read_table(
            "country_of_residence,industry,gender,wealth\nUS,Tech\n".as_bytes(),
            &ColumnMap::default(),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }
}
