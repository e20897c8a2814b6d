use serde::Serialize;
use std::collections::BTreeMap;

use super::SalesView;
use crate::error::Result;
use crate::table::SalesTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenderCount {
    pub gender: String,
    pub count: u64,
}

/// One raw age, tagged for a per-gender histogram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeSample {
    pub gender: String,
    pub age: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderMean {
    pub gender: String,
    pub mean_total_amount: f64,
}

/// Transactions per gender, most frequent first.
pub fn gender_counts(table: &SalesTable) -> Result<Vec<GenderCount>> {
    let view = SalesView::new(table)?;

    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for i in view.rows() {
        *counts.entry(view.gender.value(i)).or_default() += 1;
    }

    let mut out: Vec<GenderCount> = counts
        .into_iter()
        .map(|(gender, count)| GenderCount {
            gender: gender.to_string(),
            count,
        })
        .collect();
    // stable: equal counts keep gender order
    out.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(out)
}

/// Every customer age with its gender, in record order. Not binned.
pub fn age_distribution(table: &SalesTable) -> Result<Vec<AgeSample>> {
    let view = SalesView::new(table)?;
    Ok(view
        .rows()
        .map(|i| AgeSample {
            gender: view.gender.value(i).to_string(),
            age: view.age.value(i),
        })
        .collect())
}

/// Mean transaction amount per gender, ordered by gender.
pub fn mean_amount_by_gender(table: &SalesTable) -> Result<Vec<GenderMean>> {
    let view = SalesView::new(table)?;

    let mut acc: BTreeMap<&str, (f64, u64)> = BTreeMap::new();
    for i in view.rows() {
        let (sum, n) = acc.entry(view.gender.value(i)).or_default();
        *sum += view.total_amount.value(i);
        *n += 1;
    }

    Ok(acc
        .into_iter()
        .map(|(gender, (sum, n))| GenderMean {
            gender: gender.to_string(),
            mean_total_amount: sum / n as f64,
        })
        .collect())
}
