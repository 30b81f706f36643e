use bar_core::{BarError, Result};
use std::path::Path;

pub const TODO_GLYPH: char = '¢';

/// Number of lines in `text`; a trailing newline does not start a new line.
pub fn count_lines(text: &str) -> usize {
    text.lines().count()
}

/// Number of lines in the file at `path`.
pub async fn count_file_lines(path: &Path) -> Result<usize> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| BarError::System(format!("reading '{}': {e}", path.display())))?;
    Ok(count_lines(&text))
}

/// Block text, e.g. `¢ 3`.
pub fn format_todo(count: usize) -> String {
    format!("{TODO_GLYPH} {count}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_lines_like_a_scanner() {
        assert_eq!(count_lines(""), 0);
        assert_eq!(count_lines("one"), 1);
        assert_eq!(count_lines("one\ntwo\n"), 2);
        assert_eq!(count_lines("one\n\nthree"), 3);
    }

    #[test]
    fn todo_text() {
        assert_eq!(format_todo(7), "¢ 7");
    }

    #[tokio::test]
    async fn counts_file_on_disk() {
        let path = std::env::temp_dir().join(format!("blockbar-todo-{}", std::process::id()));
        std::fs::write(&path, "buy milk\nfix bar\n").unwrap();
        assert_eq!(count_file_lines(&path).await.unwrap(), 2);
        std::fs::remove_file(&path).unwrap();
    }
}
