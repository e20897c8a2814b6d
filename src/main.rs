use anyhow::{Context, Result};
use arrow::util::pretty::pretty_format_batches;
use salesboard::{
    aggregate::product_categories, render, Category, Config, DatasetCache, Panel, PanelData,
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) configuration ────────────────────────────────────────────
    let config = match env::var("SALESBOARD_CONFIG") {
        Ok(path) => Config::from_yaml_file(&path)?,
        Err(_) => Config::from_env()?,
    };

    // ─── 2) init logging ─────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    info!(data = %config.data_path.display(), "startup");

    // ─── 3) menu selection ───────────────────────────────────────────
    let selection: Vec<Category> = match env::args().nth(1) {
        Some(arg) => vec![arg.parse()?],
        None => Category::ALL.to_vec(),
    };

    // ─── 4) load + derive once for the session ───────────────────────
    let cache = DatasetCache::new(&config.data_path);
    let table = cache
        .load_derived()
        .with_context(|| format!("preparing {}", config.data_path.display()))?;
    info!(rows = table.num_rows(), "dataset ready");

    println!("=== Retail sales (first {} rows) ===", config.preview_rows);
    println!(
        "{}",
        pretty_format_batches(&[table.preview(config.preview_rows)])?
    );

    // ─── 5) render each selected view ────────────────────────────────
    for category in selection {
        println!();
        println!("##### {} #####", category.title());

        if category == Category::Product {
            match product_categories(&table) {
                Ok(names) => println!("Products: {}", names.join(", ")),
                Err(e) => error!(%category, "listing products failed: {}", e),
            }
        }

        match render(&table, category) {
            Ok(panels) => {
                for panel in &panels {
                    print_panel(panel)?;
                }
            }
            Err(e) => error!(%category, "view aborted: {}", e),
        }
    }

    info!("all done");
    Ok(())
}

fn print_panel(panel: &Panel) -> Result<()> {
    println!();
    println!("--- {} [{:?}] ---", panel.title, panel.chart);
    match &panel.data {
        PanelData::Scalar(v) => println!("{:.2}", v),
        PanelData::DaySales(days) => {
            for day in days {
                println!("{:<10} {:.2}", day.day_name(), day.total_amount);
            }
        }
        data => println!("{}", serde_json::to_string_pretty(data)?),
    }
    Ok(())
}
