//! Check command implementation
//!
//! Runs the consistency checks over the stored inventory and lists stock items that
//! share a name, batch, and expiry date.

use super::{open_inventory, EXIT_INVALID, EXIT_SUCCESS};
use crate::core::integrity::{check_data_consistency, find_duplicates};
use clap::Args;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {}

impl CheckArgs {
    /// Execute the check command
    ///
    /// Exits with 1 when any issue or duplicate group is found.
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, manager) = match open_inventory(config_path) {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        println!("🔍 Checking {} medicine(s)", manager.medicines().len());
        println!();

        let report = check_data_consistency(manager.medicines());
        print!("{}", report.format_summary());

        let duplicates = find_duplicates(manager.medicines());
        if duplicates.is_empty() {
            println!("✅ No duplicate stock items");
        } else {
            println!("⚠️  {} duplicate stock item group(s):", duplicates.len());
            for group in &duplicates {
                let ids: Vec<String> = group.iter().map(|m| m.id.to_string()).collect();
                println!("  - {}: {}", group[0].name, ids.join(", "));
            }
        }

        tracing::info!(
            issues = report.issues.len(),
            duplicate_groups = duplicates.len(),
            "Consistency check finished"
        );

        if report.is_valid() && duplicates.is_empty() {
            Ok(EXIT_SUCCESS)
        } else {
            Ok(EXIT_INVALID)
        }
    }
}
