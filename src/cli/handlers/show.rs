//! Show command handler.

use std::io::Write;

use anyhow::{Context, Result};

use crate::cli::ShowArgs;
use crate::content::{Kind, classify, to_hex};
use crate::store::FixtureStore;

pub fn handle_show(args: &ShowArgs, store: &FixtureStore) -> Result<()> {
    let content = store
        .read(&args.name)
        .with_context(|| format!("failed to show fixture '{}'", args.name))?;

    match classify(&content) {
        Kind::Text => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&content)?;
            stdout.flush()?;
        }
        Kind::Binary => println!("{}", to_hex(&content)),
    }
    Ok(())
}
