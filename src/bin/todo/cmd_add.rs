use anyhow::{Context, Result};

use todofile::FileStore;

pub fn exec(store: &FileStore, description: String) -> Result<()> {
    let id = store
        .update(|table| table.add(description.as_str()))
        .with_context(|| format!("add todo to {}", store.path().display()))?;
    println!("Added todo '{}' with id '{}'", description, id);
    Ok(())
}
