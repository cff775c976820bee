//! Per-column descriptive statistics

use serde::Serialize;

use crate::records::{Attribute, RecordStore, YesNo};

/// Statistics for one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Most frequent value; ties resolve to the smallest
    pub mode: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

/// Placement outcome tallies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub placed: usize,
    pub not_placed: usize,
    pub unlabeled: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub records: usize,
    pub columns: Vec<ColumnSummary>,
    pub outcomes: OutcomeCounts,
}

/// Summarizes one column of values. Returns `None` for no values.
pub fn summarize_column(column: Attribute, values: &[f64]) -> Option<ColumnSummary> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };
    let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;

    // Runs in sorted order; strict > keeps the smallest on ties
    let mut mode = sorted[0];
    let mut best_run = 0;
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j < n && sorted[j] == sorted[i] {
            j += 1;
        }
        if j - i > best_run {
            best_run = j - i;
            mode = sorted[i];
        }
        i = j;
    }

    Some(ColumnSummary {
        column: column.column_name().to_string(),
        count: n,
        mean,
        median,
        mode,
        std_dev: variance.sqrt(),
    })
}

/// Summarizes every numeric column of `store`.
///
/// An empty store yields no column summaries.
pub fn summarize(store: &RecordStore) -> DatasetSummary {
    let columns = Attribute::ALL
        .iter()
        .filter(|a| a.is_numeric())
        .filter_map(|&a| {
            let values: Vec<f64> = store.iter().filter_map(|r| r.numeric(a)).collect();
            summarize_column(a, &values)
        })
        .collect();

    let mut outcomes = OutcomeCounts::default();
    for record in store.iter() {
        match record.placement {
            Some(YesNo::Yes) => outcomes.placed += 1,
            Some(YesNo::No) => outcomes.not_placed += 1,
            None => outcomes.unlabeled += 1,
        }
    }

    DatasetSummary {
        records: store.len(),
        columns,
        outcomes,
    }
}
