use std::collections::BTreeSet;

use super::model::RecordTable;

// ---------------------------------------------------------------------------
// FilterSelection: which values are selected for each filterable column
// ---------------------------------------------------------------------------

/// Current multi-select state for the two filterable columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub countries: BTreeSet<String>,
    pub industries: BTreeSet<String>,
}

impl FilterSelection {
    /// Everything selected: the UI default, equivalent to no filtering.
    pub fn all(table: &RecordTable) -> Self {
        FilterSelection {
            countries: table.countries.iter().cloned().collect(),
            industries: table.industries.iter().cloned().collect(),
        }
    }
}

/// Return indices of rows passing both column filters, in table order.
///
/// Per-column rules:
/// * selection covers every distinct value → no constraint (rows with a
///   missing value pass too, so an untouched filter is the identity)
/// * selection is empty → nothing matches
/// * otherwise the row's value must be in the selected set; a missing
///   value is never a member, so those rows drop out
pub fn filtered_indices(table: &RecordTable, selection: &FilterSelection) -> Vec<usize> {
    let country_active = selection.countries.len() != table.countries.len();
    let industry_active = selection.industries.len() != table.industries.len();

    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            if country_active || selection.countries.is_empty() {
                match &rec.country {
                    Some(c) if selection.countries.contains(c) => {}
                    _ => return false,
                }
            }
            if industry_active || selection.industries.is_empty() {
                match &rec.industry {
                    Some(i) if selection.industries.contains(i) => {}
                    _ => return false,
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect()
}
