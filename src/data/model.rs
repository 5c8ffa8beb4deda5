use serde::Deserialize;

// ---------------------------------------------------------------------------
// ColumnMap – which source columns play which role
// ---------------------------------------------------------------------------

/// Binds the four roles the dashboard cares about to concrete column names.
///
/// Datasets in the wild disagree on naming (`country_of_residence` vs
/// `country`, `wealth` vs `netWorth`), so the binding is configuration: a
/// `columns.json` sidecar next to the data file, or header auto-detection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnMap {
    pub country: String,
    pub industry: String,
    pub gender: String,
    pub wealth: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        ColumnMap {
            country: "country_of_residence".into(),
            industry: "industry".into(),
            gender: "gender".into(),
            wealth: "wealth".into(),
        }
    }
}

/// Known aliases per role, checked in order.
const COUNTRY_ALIASES: &[&str] = &["country_of_residence", "country"];
const INDUSTRY_ALIASES: &[&str] = &["industry", "industries"];
const GENDER_ALIASES: &[&str] = &["gender", "sex"];
const WEALTH_ALIASES: &[&str] = &["wealth", "netWorth", "net_worth"];

impl ColumnMap {
    /// Resolve a mapping from a header row by trying known aliases for each
    /// role. Returns `None` when any role has no matching header.
    pub fn detect(headers: &[String]) -> Option<Self> {
        let find = |aliases: &[&str]| {
            aliases
                .iter()
                .find_map(|a| headers.iter().find(|h| h.as_str() == *a))
                .cloned()
        };
        Some(ColumnMap {
            country: find(COUNTRY_ALIASES)?,
            industry: find(INDUSTRY_ALIASES)?,
            gender: find(GENDER_ALIASES)?,
            wealth: find(WEALTH_ALIASES)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// A single billionaire (one row of the source table). Missing cells are
/// `None`; wealth is already coerced to numeric by the loader.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub country: Option<String>,
    pub industry: Option<String>,
    pub gender: Option<String>,
    /// Net worth in $ billions. `None` when the source cell was empty or
    /// not parseable as a number.
    pub wealth: Option<f64>,
}

// ---------------------------------------------------------------------------
// RecordTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed filter option lists.
///
/// Immutable after load; the UI shares it via `Arc` and works with row
/// indices rather than copies.
#[derive(Debug, Clone)]
pub struct RecordTable {
    /// All rows, in file order.
    pub records: Vec<Record>,
    /// Sorted distinct non-null countries (the selectable filter options).
    pub countries: Vec<String>,
    /// Sorted distinct non-null industries.
    pub industries: Vec<String>,
    /// Sorted distinct non-null genders.
    pub genders: Vec<String>,
}

impl RecordTable {
    /// Build the option indices from loaded rows.
    pub fn from_records(records: Vec<Record>) -> Self {
        fn distinct(records: &[Record], get: impl Fn(&Record) -> Option<&String>) -> Vec<String> {
            let mut vals: Vec<String> = records.iter().filter_map(get).cloned().collect();
            vals.sort();
            vals.dedup();
            vals
        }

        let countries = distinct(&records, |r| r.country.as_ref());
        let industries = distinct(&records, |r| r.industry.as_ref());
        let genders = distinct(&records, |r| r.gender.as_ref());

        RecordTable {
            records,
            countries,
            industries,
            genders,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
