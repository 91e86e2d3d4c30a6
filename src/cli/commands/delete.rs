//! Delete command implementation

use super::{describe, open_inventory, report_failure, EXIT_SUCCESS};
use clap::Args;

/// Arguments for the delete command
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Id of the medicine to remove
    pub id: String,
}

impl DeleteArgs {
    /// Execute the delete command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, mut manager) = match open_inventory(config_path) {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        match manager.delete(&self.id) {
            Ok(removed) => {
                println!("🗑️  Deleted {}", describe(&removed));
                Ok(EXIT_SUCCESS)
            }
            Err(e) => Ok(report_failure(&e)),
        }
    }
}
