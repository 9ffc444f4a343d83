//! Split command implementation

use anyhow::{Context, Result};
use mr_core::SplitStrategy;
use mr_sql::{split_naive, StatementSplitter};
use std::path::Path;

use crate::cli::{GlobalArgs, SplitArgs};
use crate::commands::common::load_config;

/// Execute the split command
pub async fn execute(args: &SplitArgs, global: &GlobalArgs) -> Result<()> {
    let strategy = match args.split {
        Some(arg) => arg.into(),
        None => load_config(global)?.split,
    };

    let path = Path::new(&args.file);
    let sql = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let statements = match strategy {
        SplitStrategy::Naive => split_naive(&sql),
        SplitStrategy::Tokenizer => StatementSplitter::postgres()
            .split(&sql)
            .with_context(|| format!("Failed to split {}", path.display()))?,
    };

    if global.verbose {
        eprintln!(
            "[verbose] {} splitter, {} characters in {}",
            strategy,
            sql.chars().count(),
            path.display()
        );
    }

    for (i, statement) in statements.iter().enumerate() {
        println!("-- [{}/{}]", i + 1, statements.len());
        println!("{};\n", statement);
    }
    println!("{} statements", statements.len());

    Ok(())
}
