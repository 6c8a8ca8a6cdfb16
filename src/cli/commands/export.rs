use anyhow::Context;
use std::path::Path;

use crate::cache::{ListApi, ListCache};
use crate::domain::ListScope;

pub async fn cmd_export<A: ListApi>(
    cache: &ListCache<A>,
    scope: ListScope,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let csv = cache.api().export_csv(scope).await?;

    match output {
        Some(path) => {
            tokio::fs::write(path, csv.as_bytes())
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Exported to {}", path.display());
        }
        None => print!("{csv}"),
    }

    Ok(())
}
