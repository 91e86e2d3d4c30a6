//! Update command implementation

use super::{describe, open_inventory, report_failure, MedicineFields, EXIT_INVALID, EXIT_SUCCESS};
use crate::domain::MedicineDraft;
use clap::Args;

/// Arguments for the update command
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Id of the medicine to change
    pub id: String,

    #[command(flatten)]
    pub fields: MedicineFields,
}

impl UpdateArgs {
    /// Execute the update command
    ///
    /// Fields that are not given keep their stored values.
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, mut manager) = match open_inventory(config_path) {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        let Some(existing) = manager.get(&self.id) else {
            println!("❌ Medicine not found: {}", self.id);
            return Ok(EXIT_INVALID);
        };
        let draft = self.fields.apply_to(MedicineDraft::from(existing));

        match manager.update(&draft) {
            Ok(medicine) => {
                println!("✅ Updated {}", describe(medicine));
                Ok(EXIT_SUCCESS)
            }
            Err(e) => Ok(report_failure(&e)),
        }
    }
}
