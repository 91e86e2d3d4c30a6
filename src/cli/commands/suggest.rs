//! Suggest command implementation

use super::EXIT_SUCCESS;
use crate::core::search::{popular_medicines, suggest_medicine_names, DEFAULT_SUGGESTION_LIMIT};
use clap::Args;

/// Arguments for the suggest command
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Partial medicine name; popular medicines are shown when omitted
    pub query: Option<String>,

    /// Maximum number of suggestions
    #[arg(short = 'n', long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
    pub limit: usize,
}

impl SuggestArgs {
    /// Execute the suggest command
    pub fn execute(&self) -> anyhow::Result<i32> {
        let names = match &self.query {
            Some(query) => suggest_medicine_names(query, self.limit),
            None => popular_medicines(self.limit),
        };

        if names.is_empty() {
            println!("No matching medicines");
        }
        for name in names {
            println!("{name}");
        }
        Ok(EXIT_SUCCESS)
    }
}
