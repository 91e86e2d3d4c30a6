//! List command implementation

use super::{open_inventory, EXIT_SUCCESS};
use crate::core::inventory::{self, ExpiryStatus};
use crate::domain::Medicine;
use chrono::Utc;
use clap::{Args, ValueEnum};

/// Ordering applied to the listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Order the records were added
    #[default]
    Added,
    /// Lowest quantity first
    Quantity,
    /// Most used first
    Usage,
    /// Alphabetical by name
    Name,
}

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show this category
    #[arg(long)]
    pub category: Option<String>,

    /// Match name, category, manufacturer, or batch number
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show medicines at or below the low-stock threshold
    #[arg(long)]
    pub low_stock: bool,

    #[arg(long, value_enum, default_value_t = SortOrder::Added)]
    pub sort: SortOrder,

    /// Print the records as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// Execute the list command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (config, manager) = match open_inventory(config_path) {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        let mut selected = self.select(
            manager.medicines(),
            config.inventory.low_stock_threshold,
        );
        self.sort.apply(&mut selected);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&selected)?);
            return Ok(EXIT_SUCCESS);
        }

        if selected.is_empty() {
            println!("📦 No medicines found");
            return Ok(EXIT_SUCCESS);
        }

        let today = Utc::now().date_naive();
        println!("📦 {} medicine(s)", selected.len());
        println!();
        println!(
            "{:<24} {:<30} {:<28} {:>8} {:>10}  Expiry",
            "ID", "Name", "Category", "Qty", "MRP"
        );
        for medicine in &selected {
            let status = ExpiryStatus::for_medicine(medicine, today, &config.inventory);
            println!(
                "{:<24} {:<30} {:<28} {:>8} {:>10.2}  {}",
                medicine.id,
                truncate(&medicine.name, 30),
                truncate(&medicine.category, 28),
                medicine.quantity,
                medicine.mrp,
                status
            );
        }
        println!();
        println!(
            "Total value: {:.2}",
            selected.iter().map(|m| m.total_price_invested).sum::<f64>()
        );

        Ok(EXIT_SUCCESS)
    }

    fn select<'a>(&self, medicines: &'a [Medicine], threshold: u32) -> Vec<&'a Medicine> {
        let mut selected = match &self.search {
            Some(query) => inventory::search(medicines, query),
            None => medicines.iter().collect(),
        };
        if let Some(category) = &self.category {
            selected.retain(|m| &m.category == category);
        }
        if self.low_stock {
            selected.retain(|m| m.quantity <= threshold);
        }
        selected
    }
}

impl SortOrder {
    fn apply(self, medicines: &mut [&Medicine]) {
        match self {
            SortOrder::Added => {}
            SortOrder::Quantity => medicines.sort_by_key(|m| m.quantity),
            SortOrder::Usage => medicines.sort_by(|a, b| b.usage().cmp(&a.usage())),
            SortOrder::Name => medicines.sort_by_key(|m| m.name.to_lowercase()),
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
