use anyhow::{Context, Result};
use conform_core::translate;

use crate::output;

pub fn execute(pattern: &str) -> Result<()> {
    let layout =
        translate(pattern).with_context(|| format!("Failed to translate pattern: {}", pattern))?;

    output::print_success(&format!("{} -> {}", pattern, layout));
    Ok(())
}
