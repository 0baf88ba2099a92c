use anyhow::{Context, Result};

use todofile::{CheckOutcome, FileStore};

pub fn exec(store: &FileStore, id: u64) -> Result<()> {
    let (outcome, description) = store
        .update(|table| {
            let outcome = table.check(id)?;
            let description = table
                .get(id)
                .map(|t| t.description.clone())
                .unwrap_or_default();
            Ok((outcome, description))
        })
        .with_context(|| format!("check todo {} in {}", id, store.path().display()))?;

    match outcome {
        CheckOutcome::Completed => println!("Marked '{}' as completed", description),
        CheckOutcome::AlreadyCompleted => println!("Already completed."),
    }
    Ok(())
}
