use std::path::PathBuf;

use flowscan_config::Config;
use flowscan_core::PatternCategory;

/// Input parameters for the Info command strategy.
#[derive(Debug, Clone)]
pub struct InfoInput {
    /// Explicit `--config` path, if one was given
    pub source: Option<PathBuf>,
    pub config: Config,
}

/// Strategy for displaying the effective configuration.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = InfoInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = &input.config;

        println!("=== flowscan Configuration ===\n");

        let source = input.source.map_or_else(describe_default_source, |path| {
            Ok(path.display().to_string())
        })?;
        println!("Source: {source}");
        println!();

        println!("Scanner:");
        println!("  Case Sensitive: {}", config.scanner.case_sensitive);
        println!("  Whole Word: {}", config.scanner.whole_word);
        println!("  Base Confidence: {}", config.scanner.base_confidence);
        println!();

        let extractor = config.extractor();
        for (label, category) in [
            ("Date Patterns", PatternCategory::Date),
            ("Amount Patterns", PatternCategory::Amount),
        ] {
            let patterns = extractor.patterns(category);
            if patterns.is_empty() {
                println!("{label}: (none)");
            } else {
                println!("{label}:");
                for pattern in patterns {
                    println!("  {pattern}");
                }
            }
        }
        if !extractor.compile_errors().is_empty() {
            println!("Compile Errors:");
            for error in extractor.compile_errors() {
                println!("  {error}");
            }
        }
        println!();

        println!("Keywords:");
        if config.extractor.keywords.is_empty() {
            println!("  (none)");
        }
        for group in &config.extractor.keywords {
            println!("  {}: {}", group.entity_type, group.keywords.join(", "));
        }

        Ok(())
    }
}

fn describe_default_source() -> anyhow::Result<String> {
    let path = Config::default_path()?;
    if path.exists() {
        Ok(path.display().to_string())
    } else {
        Ok("(built-in defaults)".to_string())
    }
}
