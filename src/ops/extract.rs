use std::path::Path;

use crate::io::vault_io::{self, VaultError};
use crate::model::task::Task;
use crate::parse::line::is_task_line;

/// Task lines of already-loaded note text
pub fn tasks_in_text(path: &Path, content: &str) -> Vec<Task> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| is_task_line(line))
        .map(|(idx, line)| Task::new(path, idx + 1, line))
        .collect()
}

/// Every task line of one note, in file order
pub fn extract_tasks(path: &Path) -> Result<Vec<Task>, VaultError> {
    let content = vault_io::read_note(path)?;
    Ok(tasks_in_text(path, &content))
}

/// Tasks of every note under `root` (a note file or a directory), in walk
/// order.
pub fn extract_tasks_tree(root: &Path) -> Result<Vec<Task>, VaultError> {
    let mut tasks = Vec::new();
    for note in vault_io::list_note_files(root)? {
        tasks.extend(extract_tasks(&note)?);
    }
    Ok(tasks)
}
