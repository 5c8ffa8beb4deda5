use std::collections::HashMap;

use thiserror::Error;

use super::model::{Record, RecordTable};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Raised by [`mean_wealth`] when the subset holds no numeric value at all.
/// The UI prevents this by skipping aggregation over empty subsets, and
/// renders "no data" if it happens anyway.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no numeric data to aggregate")]
pub struct NoDataError;

// ---------------------------------------------------------------------------
// Scalar aggregates
// ---------------------------------------------------------------------------

/// Number of rows in the subset.
pub fn count(indices: &[usize]) -> usize {
    indices.len()
}

/// Sum of non-null wealth over the subset. Nulls are skipped, not zeroed;
/// an all-null (or empty) subset sums to 0.0.
pub fn sum_wealth(table: &RecordTable, indices: &[usize]) -> f64 {
    wealth_values(table, indices).sum()
}

/// Mean of non-null wealth over the subset.
pub fn mean_wealth(table: &RecordTable, indices: &[usize]) -> Result<f64, NoDataError> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in wealth_values(table, indices) {
        sum += v;
        n += 1;
    }
    if n == 0 {
        return Err(NoDataError);
    }
    Ok(sum / n as f64)
}

fn wealth_values<'a>(
    table: &'a RecordTable,
    indices: &'a [usize],
) -> impl Iterator<Item = f64> + 'a {
    indices.iter().filter_map(|&i| table.records[i].wealth)
}

// ---------------------------------------------------------------------------
// Value counts
// ---------------------------------------------------------------------------

/// Which categorical column to group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Categorical {
    Country,
    Industry,
    Gender,
}

impl Categorical {
    fn get(self, rec: &Record) -> Option<&String> {
        match self {
            Categorical::Country => rec.country.as_ref(),
            Categorical::Industry => rec.industry.as_ref(),
            Categorical::Gender => rec.gender.as_ref(),
        }
    }
}

/// Frequency of each distinct non-null value of `column` over the subset,
/// ordered by count descending. Ties keep first-encountered order (the
/// accumulation preserves first-seen order and the sort is stable). With
/// `top_n`, the list is truncated after ordering.
pub fn value_counts(
    table: &RecordTable,
    indices: &[usize],
    column: Categorical,
    top_n: Option<usize>,
) -> Vec<(String, usize)> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();

    for &i in indices {
        let Some(val) = column.get(&table.records[i]) else {
            continue;
        };
        match slot.get(val.as_str()) {
            Some(&pos) => order[pos].1 += 1,
            None => {
                // Borrow the table's string, not the entry we push, so the
                // map stays valid while `order` grows.
                slot.insert(val.as_str(), order.len());
                order.push((val.clone(), 1));
            }
        }
    }

    order.sort_by(|a, b| b.1.cmp(&a.1));
    if let Some(n) = top_n {
        order.truncate(n);
    }
    order
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// One fixed-width histogram bin.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub center: f64,
    pub width: f64,
    pub count: usize,
}

/// Bin the subset's non-null wealth values into `bins` equal-width buckets
/// spanning `[min, max]`. A degenerate range (single distinct value)
/// collapses to one bin; no values yields no bins.
pub fn histogram(table: &RecordTable, indices: &[usize], bins: usize) -> Vec<HistogramBin> {
    let values: Vec<f64> = wealth_values(table, indices).collect();
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range.abs() < f64::EPSILON {
        return vec![HistogramBin {
            center: min,
            width: 1.0,
            count: values.len(),
        }];
    }

    let width = range / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in values {
        // Max lands in the last bin, not one past the end.
        let slot = (((v - min) / width) as usize).min(bins - 1);
        counts[slot] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            center: min + (i as f64 + 0.5) * width,
            width,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(Option<&str>, Option<&str>, Option<f64>)]) -> RecordTable {
        RecordTable::from_records(
            rows.iter()
                .map(|(c, i, w)| Record {
                    country: c.map(String::from),
                    industry: i.map(String::from),
                    gender: None,
                    wealth: *w,
                })
                .collect(),
        )
    }

    fn all_indices(t: &RecordTable) -> Vec<usize> {
        (0..t.len()).collect()
    }

    #[test]
    fn sum_and_mean_skip_nulls() {
        let t = table(&[
            (Some("US"), Some("Tech"), Some(1.0)),
            (Some("US"), Some("Tech"), None),
            (Some("US"), Some("Tech"), Some(3.0)),
        ]);
        let idx = all_indices(&t);
        assert_eq!(count(&idx), 3);
        assert_eq!(sum_wealth(&t, &idx), 4.0);
        assert_eq!(mean_wealth(&t, &idx).unwrap(), 2.0);
    }

    #[test]
    fn mean_of_all_nulls_is_no_data() {
        let t = table(&[(Some("US"), Some("Tech"), None)]);
        assert_eq!(mean_wealth(&t, &all_indices(&t)), Err(NoDataError));
        assert_eq!(sum_wealth(&t, &all_indices(&t)), 0.0);
    }

    #[test]
    fn value_counts_orders_by_count_descending() {
        let t = table(&[
            (Some("US"), Some("Tech"), None),
            (Some("US"), Some("Tech"), None),
            (Some("US"), Some("Finance"), None),
            (Some("US"), Some("Tech"), None),
        ]);
        let counts = value_counts(&t, &all_indices(&t), Categorical::Industry, None);
        assert_eq!(
            counts,
            vec![("Tech".to_string(), 3), ("Finance".to_string(), 1)]
        );
    }

    #[test]
    fn value_counts_breaks_ties_by_first_encounter() {
        let t = table(&[
            (Some("DE"), None, None),
            (Some("US"), None, None),
            (Some("DE"), None, None),
            (Some("US"), None, None),
            (Some("FR"), None, None),
        ]);
        let counts = value_counts(&t, &all_indices(&t), Categorical::Country, None);
        assert_eq!(
            counts,
            vec![
                ("DE".to_string(), 2),
                ("US".to_string(), 2),
                ("FR".to_string(), 1)
            ]
        );
    }

    #[test]
    fn value_counts_truncates_to_top_n() {
        let t = table(&[
            (Some("US"), None, None),
            (Some("US"), None, None),
            (Some("DE"), None, None),
            (Some("FR"), None, None),
        ]);
        let counts = value_counts(&t, &all_indices(&t), Categorical::Country, Some(2));
        assert_eq!(
            counts,
            vec![("US".to_string(), 2), ("DE".to_string(), 1)]
        );
    }

    #[test]
    fn value_counts_skips_nulls_and_reconciles_with_count() {
        let t = table(&[
            (Some("US"), Some("Tech"), None),
            (None, Some("Tech"), None),
            (Some("DE"), Some("Tech"), None),
        ]);
        let idx = all_indices(&t);
        let by_industry = value_counts(&t, &idx, Categorical::Industry, None);
        // Industry is fully populated, so its counts reconcile with count().
        let total: usize = by_industry.iter().map(|(_, n)| n).sum();
        assert_eq!(total, count(&idx));
        // Country has a null, which grouping excludes.
        let by_country: usize = value_counts(&t, &idx, Categorical::Country, None)
            .iter()
            .map(|(_, n)| n)
            .sum();
        assert_eq!(by_country, 2);
    }

    #[test]
    fn histogram_bins_boundaries() {
        let t = table(&[
            (None, None, Some(0.0)),
            (None, None, Some(5.0)),
            (None, None, Some(9.9)),
            (None, None, Some(10.0)),
        ]);
        let bins = histogram(&t, &all_indices(&t), 2);
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].count, 1); // 0.0; the boundary value 5.0 opens bin 1
        assert_eq!(bins[1].count, 3); // 5.0, 9.9, and the max value 10.0
        assert!((bins[0].width - 5.0).abs() < 1e-12);
    }

    #[test]
    fn histogram_degenerate_range_is_one_bin() {
        let t = table(&[(None, None, Some(2.5)), (None, None, Some(2.5))]);
        let bins = histogram(&t, &all_indices(&t), 30);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 2);
    }

    #[test]
    fn histogram_of_empty_subset_is_empty() {
        let t = table(&[(None, None, None)]);
        assert!(histogram(&t, &all_indices(&t), 30).is_empty());
        assert!(histogram(&t, &[], 30).is_empty());
    }
}
