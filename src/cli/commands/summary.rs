//! Summary command implementation

use super::{open_inventory, EXIT_SUCCESS};
use crate::core::inventory::{self, InventorySummary};
use chrono::Utc;
use clap::Args;

/// Arguments for the summary command
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl SummaryArgs {
    /// Execute the summary command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (config, manager) = match open_inventory(config_path) {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        let medicines = manager.medicines();
        let summary =
            InventorySummary::compute(medicines, Utc::now().date_naive(), &config.inventory);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(EXIT_SUCCESS);
        }

        println!("📊 Inventory Summary");
        println!();
        println!("  Medicines:        {}", summary.total_medicines);
        println!("  Units in stock:   {}", summary.total_quantity);
        println!("  Total invested:   {:.2}", summary.total_investment);
        println!("  Expired:          {}", summary.expired);
        println!(
            "  Expiring soon:    {} (within {} days)",
            summary.expiring_soon, config.inventory.expiry_critical_days
        );
        println!(
            "  Low stock:        {} (at or below {} units)",
            summary.low_stock, config.inventory.low_stock_threshold
        );
        println!(
            "  Last {} days:     {} added, {:.2} invested",
            inventory::RECENT_WINDOW_DAYS,
            summary.recent_additions,
            summary.recent_investment
        );
        println!(
            "  This month:       {} added, {:.2} invested",
            summary.monthly_additions, summary.monthly_investment
        );

        if !summary.by_category.is_empty() {
            println!();
            println!("By category:");
            for (category, count) in &summary.by_category {
                println!("  {category}: {count}");
            }
        }

        let most_used = inventory::most_used(medicines, config.inventory.most_used_limit);
        if !most_used.is_empty() {
            println!();
            println!("Most used:");
            for medicine in most_used {
                println!("  {} ({} uses)", medicine.name, medicine.usage());
            }
        }

        let low = inventory::sort_by_quantity(medicines);
        let low: Vec<_> = low
            .into_iter()
            .filter(|m| m.quantity <= config.inventory.low_stock_threshold)
            .collect();
        if !low.is_empty() {
            println!();
            println!("Running low:");
            for medicine in low {
                println!("  {} ({} left)", medicine.name, medicine.quantity);
            }
        }
        println!();

        Ok(EXIT_SUCCESS)
    }
}
