//! Static strategy pattern for CLI commands.
//!
//! Each command is its own type with its own input, dispatched statically
//! from `main`.

use std::io::Read;

use flowscan_core::{EntityType, KeywordGroup};
use serde::Serialize;

mod extract;
mod info;
mod init;
mod scan;
mod search;
mod tokenize;
mod version;

pub use extract::{ExtractInput, ExtractStrategy};
pub use info::{InfoInput, InfoStrategy};
pub use init::InitStrategy;
pub use scan::{ScanInput, ScanStrategy};
pub use search::{SearchInput, SearchStrategy};
pub use tokenize::{TokenizeInput, TokenizeStrategy};
pub use version::VersionStrategy;

/// Contract shared by all command strategies.
///
/// Each strategy defines its own input type, so `main` passes parameters
/// without boxing or runtime casting.
pub trait CommandStrategy {
    /// The input type this strategy accepts.
    type Input;

    /// Run the command.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// The positional text argument, or all of stdin when it is absent.
pub fn read_text(text: Option<String>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read text from stdin: {e}"))?;
    Ok(buffer)
}

/// Parse `type=kw,kw,...` into a keyword group.
pub fn parse_keyword_group(arg: &str) -> Result<KeywordGroup, String> {
    let (kind, list) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected <type>=<keyword,...>, got `{arg}`"))?;
    let entity_type: EntityType = kind.trim().parse().map_err(|e| format!("{e}"))?;

    let keywords: Vec<String> = list
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(ToString::to_string)
        .collect();
    if keywords.is_empty() {
        return Err(format!("no keywords given for `{kind}`"));
    }

    Ok(KeywordGroup {
        entity_type,
        keywords,
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
