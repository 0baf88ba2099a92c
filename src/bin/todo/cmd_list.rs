use anyhow::{Context, Result};

use todofile::{FileStore, Todo};

use super::util::{display_time, render_columns};

pub fn exec(store: &FileStore) -> Result<()> {
    let table = store
        .load()
        .with_context(|| format!("load {}", store.path().display()))?;
    print!("{}", render(table.sorted()));
    Ok(())
}

fn render(entries: Vec<(u64, &Todo)>) -> String {
    let mut rows = Vec::with_capacity(entries.len() + 1);
    rows.push(["ID", "Description", "Completed", "Created At"].map(String::from));
    for (id, t) in entries {
        rows.push([
            id.to_string(),
            t.description.clone(),
            t.completed.to_string(),
            display_time(&t.created_at),
        ]);
    }
    render_columns(&rows)
}
