//! Use command implementation
//!
//! Records one dispense of a medicine: bumps its usage count and stamps today's date.

use super::{open_inventory, report_failure, EXIT_SUCCESS};
use clap::Args;

/// Arguments for the use command
#[derive(Args, Debug)]
pub struct UseArgs {
    /// Id of the medicine that was used
    pub id: String,
}

impl UseArgs {
    /// Execute the use command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, mut manager) = match open_inventory(config_path) {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        match manager.increment_usage(&self.id) {
            Ok(medicine) => {
                println!(
                    "✅ {} used {} time(s), last on {}",
                    medicine.name,
                    medicine.usage(),
                    medicine.last_used.as_deref().unwrap_or("-")
                );
                Ok(EXIT_SUCCESS)
            }
            Err(e) => Ok(report_failure(&e)),
        }
    }
}
