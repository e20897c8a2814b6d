use serde::Serialize;
use std::collections::HashMap;

use super::SalesView;
use crate::error::{DashboardError, Result};
use crate::table::SalesTable;

/// One point of the age vs. spend scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeSpendPoint {
    pub age: i64,
    pub total_amount: f64,
    pub gender: String,
}

/// Mean units per transaction.
pub fn mean_quantity(table: &SalesTable) -> Result<f64> {
    let view = SalesView::new(table)?;
    if view.len() == 0 {
        return Err(DashboardError::EmptyAggregation("mean quantity"));
    }
    let total: i128 = view.quantity.values().iter().map(|q| *q as i128).sum();
    Ok(total as f64 / view.len() as f64)
}

/// Mean of each customer's summed spend. Customers are grouped first, so a
/// customer with many transactions counts once.
pub fn mean_spend_per_customer(table: &SalesTable) -> Result<f64> {
    let view = SalesView::new(table)?;

    let mut per_customer: HashMap<&str, f64> = HashMap::new();
    for i in view.rows() {
        *per_customer.entry(view.customer_id.value(i)).or_default() += view.total_amount.value(i);
    }

    if per_customer.is_empty() {
        return Err(DashboardError::EmptyAggregation("mean spend per customer"));
    }
    let total: f64 = per_customer.values().sum();
    Ok(total / per_customer.len() as f64)
}

/// Every (age, amount, gender) triple, unaggregated, in record order.
pub fn age_vs_spend(table: &SalesTable) -> Result<Vec<AgeSpendPoint>> {
    let view = SalesView::new(table)?;
    Ok(view
        .rows()
        .map(|i| AgeSpendPoint {
            age: view.age.value(i),
            total_amount: view.total_amount.value(i),
            gender: view.gender.value(i).to_string(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::fixtures;

    #[test]
    fn mean_quantity_over_records() {
        let t = fixtures::table(&[
            "2023-01-01,C1,Male,20,Beauty,1,10",
            "2023-01-02,C2,Female,21,Beauty,4,10",
        ]);
        assert_eq!(mean_quantity(&t).unwrap(), 2.5);
    }

    #[test]
    fn mean_quantity_survives_sums_past_i64() {
        let t = fixtures::table(&[
            "2023-01-01,C1,Male,20,Beauty,9223372036854775807,10",
            "2023-01-02,C2,Female,21,Beauty,1,10",
        ]);
        let expected = (i64::MAX as f64 + 1.0) / 2.0;
        assert_eq!(mean_quantity(&t).unwrap(), expected);
    }

    #[test]
    fn per_customer_mean_groups_before_averaging() {
        // C1 spends 100 + 300, C2 spends 200
        let t = fixtures::table(&[
            "2023-01-01,C1,Male,20,Beauty,1,100",
            "2023-01-02,C1,Male,20,Beauty,1,300",
            "2023-01-03,C2,Female,30,Beauty,1,200",
        ]);
        let per_customer = mean_spend_per_customer(&t).unwrap();
        assert_eq!(per_customer, 300.0);

        let flat = 600.0 / 3.0;
        assert_ne!(per_customer, flat);
    }

    #[test]
    fn per_customer_mean_matches_flat_mean_for_single_purchases() {
        let t = fixtures::table(&[
            "2023-01-01,C1,Male,20,Beauty,1,100",
            "2023-01-02,C2,Female,30,Beauty,1,200",
        ]);
        assert_eq!(mean_spend_per_customer(&t).unwrap(), 150.0);
    }

    #[test]
    fn scatter_returns_triples_unmodified() {
        let t = fixtures::table(&[
            "2023-01-01,C1,Male,20,Beauty,1,100",
            "2023-01-02,C2,Female,40,Beauty,1,300",
        ]);
        assert_eq!(
            age_vs_spend(&t).unwrap(),
            vec![
                AgeSpendPoint { age: 20, total_amount: 100.0, gender: "Male".into() },
                AgeSpendPoint { age: 40, total_amount: 300.0, gender: "Female".into() },
            ]
        );
    }

    #[test]
    fn means_fail_on_empty_table() {
        let t = fixtures::empty();
        assert!(matches!(
            mean_quantity(&t),
            Err(DashboardError::EmptyAggregation(_))
        ));
        assert!(matches!(
            mean_spend_per_customer(&t),
            Err(DashboardError::EmptyAggregation(_))
        ));
        assert!(age_vs_spend(&t).unwrap().is_empty());
    }
}
