use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use super::SalesView;
use crate::error::Result;
use crate::table::SalesTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySales {
    pub year: i32,
    pub month: u32,
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySales {
    /// 0 = Monday … 6 = Sunday
    pub day_of_week: u32,
    pub total_amount: f64,
}

impl DaySales {
    pub fn day_name(&self) -> &'static str {
        match self.day_of_week {
            0 => "Monday",
            1 => "Tuesday",
            2 => "Wednesday",
            3 => "Thursday",
            4 => "Friday",
            5 => "Saturday",
            _ => "Sunday",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekendSales {
    pub weekend: bool,
    pub total_amount: f64,
}

/// Total amount per (year, month) for every year present, all twelve
/// months each, ordered by year then month.
///
/// Sums are grouped first, then a complete year × month grid is left-joined
/// against them with missing cells coalesced to 0.
pub fn monthly_sales(table: &SalesTable) -> Result<Vec<MonthlySales>> {
    let view = SalesView::new(table)?;

    let mut years = BTreeSet::new();
    let mut sums: HashMap<(i32, u32), f64> = HashMap::new();
    for i in view.rows() {
        let key = (view.year.value(i), view.month.value(i) as u32);
        years.insert(key.0);
        *sums.entry(key).or_insert(0.0) += view.total_amount.value(i);
    }

    let grid = years
        .into_iter()
        .flat_map(|year| (1..=12u32).map(move |month| (year, month)));

    Ok(grid
        .map(|(year, month)| MonthlySales {
            year,
            month,
            total_amount: sums.get(&(year, month)).copied().unwrap_or(0.0),
        })
        .collect())
}

/// Total amount per weekday across all years; only weekdays that occur.
pub fn sales_by_day_of_week(table: &SalesTable) -> Result<Vec<DaySales>> {
    let view = SalesView::new(table)?;

    let mut sums = [None::<f64>; 7];
    for i in view.rows() {
        let slot = &mut sums[view.day_of_week.value(i) as usize % 7];
        *slot = Some(slot.unwrap_or(0.0) + view.total_amount.value(i));
    }

    Ok(sums
        .iter()
        .enumerate()
        .filter_map(|(day, total)| {
            total.map(|total_amount| DaySales {
                day_of_week: day as u32,
                total_amount,
            })
        })
        .collect())
}

/// Always two rows: weekdays first, then the weekend.
pub fn weekend_vs_weekday(table: &SalesTable) -> Result<Vec<WeekendSales>> {
    let view = SalesView::new(table)?;

    let (mut weekday, mut weekend) = (0.0, 0.0);
    for i in view.rows() {
        if view.weekend.value(i) {
            weekend += view.total_amount.value(i);
        } else {
            weekday += view.total_amount.value(i);
        }
    }

    Ok(vec![
        WeekendSales {
            weekend: false,
            total_amount: weekday,
        },
        WeekendSales {
            weekend: true,
            total_amount: weekend,
        },
    ])
}
