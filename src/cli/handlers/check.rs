//! Check command handler.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::cli::{CheckArgs, InputFormat};
use crate::compare::{Fixtures, Normalize, Outcome};
use crate::content::reindent_json;

pub fn handle_check(args: &CheckArgs, fixtures: &Fixtures, verbose: bool) -> Result<()> {
    let input = read_input(args.input.as_deref())?;

    match compare_input(fixtures, &args.name, args.format, input)? {
        Outcome::Updated { path } => println!("updated {}", path.display()),
        Outcome::Matched { path } => {
            if verbose {
                println!("ok {}", path.display());
            }
        }
        Outcome::Mismatch(mismatch) => {
            print!("{mismatch}");
            bail!("fixture mismatch: {}", mismatch.path.display());
        }
    }
    Ok(())
}

/// Runs the comparison matching `format` over raw input bytes.
pub fn compare_input(
    fixtures: &Fixtures,
    name: &str,
    format: InputFormat,
    input: Vec<u8>,
) -> Result<Outcome> {
    let outcome = match format {
        InputFormat::Text => {
            let text = String::from_utf8(input)
                .context("input is not valid UTF-8 (use --format bytes for binary input)")?;
            fixtures.check_text(name, &text)?
        }
        InputFormat::Json => {
            // Already a document: keep its key order and spelling.
            let pretty = reindent_json(&input).context("input is not a valid JSON document")?;
            fixtures.check(name, &pretty, Normalize::Json)?
        }
        InputFormat::Bytes => fixtures.check_bytes(name, &input)?,
    };
    Ok(outcome)
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read(path)
            .with_context(|| format!("failed to read input: {}", path.display())),
        _ => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
