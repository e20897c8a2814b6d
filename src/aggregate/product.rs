use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use super::SalesView;
use crate::error::{DashboardError, Result};
use crate::schema::types::PRODUCT_CATEGORY;
use crate::table::SalesTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryQuantity {
    pub category: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total_amount: f64,
    /// Fraction of the grand total, in [0, 1].
    pub share: f64,
}

/// Units sold per category, ascending. Ties keep category order.
pub fn quantity_by_category(table: &SalesTable) -> Result<Vec<CategoryQuantity>> {
    let view = SalesView::new(table)?;

    let mut sums: BTreeMap<&str, i64> = BTreeMap::new();
    for i in view.rows() {
        let category = view.category.value(i);
        let sum = sums.entry(category).or_default();
        *sum = sum.checked_add(view.quantity.value(i)).ok_or_else(|| {
            DashboardError::Schema(format!("quantity total for `{}` overflows i64", category))
        })?;
    }

    let mut out: Vec<CategoryQuantity> = sums
        .into_iter()
        .map(|(category, quantity)| CategoryQuantity {
            category: category.to_string(),
            quantity,
        })
        .collect();
    out.sort_by_key(|c| c.quantity);
    Ok(out)
}

/// Revenue per category, ascending.
pub fn revenue_by_category(table: &SalesTable) -> Result<Vec<CategoryRevenue>> {
    let view = SalesView::new(table)?;

    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for i in view.rows() {
        *sums.entry(view.category.value(i)).or_default() += view.total_amount.value(i);
    }

    let mut out: Vec<CategoryRevenue> = sums
        .into_iter()
        .map(|(category, total_amount)| CategoryRevenue {
            category: category.to_string(),
            total_amount,
        })
        .collect();
    out.sort_by(|a, b| a.total_amount.total_cmp(&b.total_amount));
    Ok(out)
}

/// The per-category revenue table with each row's share of the whole.
/// With a grand total of zero every share is reported as 0.
pub fn revenue_share_by_category(table: &SalesTable) -> Result<Vec<CategoryShare>> {
    let revenue = revenue_by_category(table)?;
    let grand_total: f64 = revenue.iter().map(|r| r.total_amount).sum();

    Ok(revenue
        .into_iter()
        .map(|r| CategoryShare {
            share: if grand_total > 0.0 {
                r.total_amount / grand_total
            } else {
                0.0
            },
            category: r.category,
            total_amount: r.total_amount,
        })
        .collect())
}

/// Distinct product categories in order of first appearance.
pub fn product_categories(table: &SalesTable) -> Result<Vec<String>> {
    let categories = table.utf8(PRODUCT_CATEGORY)?;
    let mut seen = HashSet::new();
    Ok(categories
        .iter()
        .flatten()
        .filter(|c| seen.insert(*c))
        .map(str::to_string)
        .collect())
}
