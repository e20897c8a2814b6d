//! Menu categories and the panels each one renders.
//!
//! Selecting a category runs exactly its three aggregations, in a fixed
//! order, via a plain dispatch table. A view either renders completely or
//! returns the first error.

use serde::Serialize;
use std::{fmt, str::FromStr};
use thiserror::Error;
use tracing::debug;

use crate::aggregate::{
    self,
    customer::{AgeSample, GenderCount, GenderMean},
    product::{CategoryQuantity, CategoryRevenue, CategoryShare},
    spending::AgeSpendPoint,
    trend::{DaySales, MonthlySales, WeekendSales},
};
use crate::error::Result;
use crate::table::SalesTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SalesTrend,
    Customer,
    Product,
    Spending,
}

impl Category {
    /// Menu order.
    pub const ALL: [Category; 4] = [
        Category::SalesTrend,
        Category::Customer,
        Category::Product,
        Category::Spending,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Category::SalesTrend => "Sales Trend",
            Category::Customer => "Customers",
            Category::Product => "Products",
            Category::Spending => "Purchases and Spending",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category `{0}` (expected trend, customer, product or spending)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if let Some(c) = Category::ALL
            .iter()
            .find(|c| c.title().to_lowercase() == wanted)
        {
            return Ok(*c);
        }
        match wanted.as_str() {
            "trend" | "sales" | "sales_trend" => Ok(Category::SalesTrend),
            "customer" | "customers" => Ok(Category::Customer),
            "product" | "products" => Ok(Category::Product),
            "spending" | "purchase" | "purchases" => Ok(Category::Spending),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// How the shell should draw a panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    HorizontalBar,
    Pie,
    Histogram,
    Scatter,
    Text,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum PanelData {
    MonthlySales(Vec<MonthlySales>),
    DaySales(Vec<DaySales>),
    WeekendSales(Vec<WeekendSales>),
    GenderCounts(Vec<GenderCount>),
    AgeDistribution(Vec<AgeSample>),
    GenderMeans(Vec<GenderMean>),
    CategoryQuantities(Vec<CategoryQuantity>),
    CategoryRevenue(Vec<CategoryRevenue>),
    CategoryShares(Vec<CategoryShare>),
    Scalar(f64),
    AgeVsSpend(Vec<AgeSpendPoint>),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Panel {
    pub title: &'static str,
    pub chart: ChartKind,
    pub data: PanelData,
}

pub type PanelBuilder = fn(&SalesTable) -> Result<Panel>;

/// The three panels of `category`, in display order.
pub fn panel_builders(category: Category) -> [PanelBuilder; 3] {
    match category {
        Category::SalesTrend => [monthly_trend, day_of_week_sales, weekend_sales],
        Category::Customer => [gender_count, age_histogram, gender_mean_spend],
        Category::Product => [category_volume, category_revenue, category_share],
        Category::Spending => [average_quantity, average_customer_spend, age_spend_scatter],
    }
}

/// Run every panel of `category`. Any failure aborts the whole view.
#[tracing::instrument(level = "info", skip(table), fields(category = %category))]
pub fn render(table: &SalesTable, category: Category) -> Result<Vec<Panel>> {
    let panels = panel_builders(category)
        .iter()
        .map(|build| build(table))
        .collect::<Result<Vec<_>>>()?;
    debug!(panels = panels.len(), "rendered view");
    Ok(panels)
}

fn monthly_trend(t: &SalesTable) -> Result<Panel> {
    Ok(Panel {
        title: "Monthly sales per year",
        chart: ChartKind::Line,
        data: PanelData::MonthlySales(aggregate::monthly_sales(t)?),
    })
}

fn day_of_week_sales(t: &SalesTable) -> Result<Panel> {
    Ok(Panel {
        title: "Total sales by day of week",
        chart: ChartKind::Bar,
        data: PanelData::DaySales(aggregate::sales_by_day_of_week(t)?),
    })
}

fn weekend_sales(t: &SalesTable) -> Result<Panel> {
    Ok(Panel {
        title: "Weekend vs weekday sales",
        chart: ChartKind::Bar,
        data: PanelData::WeekendSales(aggregate::weekend_vs_weekday(t)?),
    })
}

fn gender_count(t: &SalesTable) -> Result<Panel> {
    Ok(Panel {
        title: "Transactions by gender",
        chart: ChartKind::Bar,
        data: PanelData::GenderCounts(aggregate::gender_counts(t)?),
    })
}

fn age_histogram(t: &SalesTable) -> Result<Panel> {
    Ok(Panel {
        title: "Customer age distribution by gender",
        chart: ChartKind::Histogram,
        data: PanelData::AgeDistribution(aggregate::age_distribution(t)?),
    })
}

fn gender_mean_spend(t: &SalesTable) -> Result<Panel> {
    Ok(Panel {
        title: "Average spend by gender",
        chart: ChartKind::Bar,
        data: PanelData::GenderMeans(aggregate::mean_amount_by_gender(t)?),
    })
}

fn category_volume(t: &SalesTable) -> Result<Panel> {
    Ok(Panel {
        title: "Best-selling product categories",
        chart: ChartKind::HorizontalBar,
        data: PanelData::CategoryQuantities(aggregate::quantity_by_category(t)?),
    })
}

fn category_revenue(t: &SalesTable) -> Result<Panel> {
    Ok(Panel {
        title: "Revenue by product category",
        chart: ChartKind::HorizontalBar,
        data: PanelData::CategoryRevenue(aggregate::revenue_by_category(t)?),
    })
}

fn category_share(t: &SalesTable) -> Result<Panel> {
    Ok(Panel {
        title: "Share of revenue by product category",
        chart: ChartKind::Pie,
        data: PanelData::CategoryShares(aggregate::revenue_share_by_category(t)?),
    })
}

fn average_quantity(t: &SalesTable) -> Result<Panel> {
    Ok(Panel {
        title: "Average units per transaction",
        chart: ChartKind::Text,
        data: PanelData::Scalar(aggregate::mean_quantity(t)?),
    })
}

fn average_customer_spend(t: &SalesTable) -> Result<Panel> {
    Ok(Panel {
        title: "Average spend per customer",
        chart: ChartKind::Text,
        data: PanelData::Scalar(aggregate::mean_spend_per_customer(t)?),
    })
}

fn age_spend_scatter(t: &SalesTable) -> Result<Panel> {
    Ok(Panel {
        title: "Customer age vs total spend",
        chart: ChartKind::Scatter,
        data: PanelData::AgeVsSpend(aggregate::age_vs_spend(t)?),
    })
}
