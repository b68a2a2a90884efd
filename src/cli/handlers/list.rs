//! List command handler.

use anyhow::{Context, Result};

use crate::cli::ListArgs;
use crate::cli::output::{Output, OutputFormat, listing_line};
use crate::store::FixtureStore;

pub fn handle_list(args: &ListArgs, store: &FixtureStore) -> Result<()> {
    let entries = store
        .list()
        .with_context(|| format!("failed to list fixtures in {}", store.dir().display()))?;

    match args.format {
        OutputFormat::Human => {
            if entries.is_empty() {
                println!("No fixtures found in {}.", store.dir().display());
            } else {
                for entry in &entries {
                    println!("{}", listing_line(entry));
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(&entries))?);
        }
        OutputFormat::Paths => {
            for entry in &entries {
                println!("{}", entry.path.display());
            }
        }
    }
    Ok(())
}
