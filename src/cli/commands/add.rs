//! Add command implementation

use super::{describe, open_inventory, report_failure, MedicineFields, EXIT_SUCCESS};
use crate::domain::MedicineDraft;
use clap::Args;

/// Arguments for the add command
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Explicit id; one is generated when omitted
    #[arg(long)]
    pub id: Option<String>,

    #[command(flatten)]
    pub fields: MedicineFields,
}

impl AddArgs {
    /// Execute the add command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let (_, mut manager) = match open_inventory(config_path) {
            Ok(opened) => opened,
            Err(code) => return Ok(code),
        };

        let mut draft = MedicineDraft::new();
        if let Some(id) = &self.id {
            draft = draft.id(id.as_str());
        }
        let draft = self.fields.apply_to(draft);

        match manager.add(&draft) {
            Ok(medicine) => {
                println!("✅ Added {}", describe(medicine));
                Ok(EXIT_SUCCESS)
            }
            Err(e) => Ok(report_failure(&e)),
        }
    }
}
