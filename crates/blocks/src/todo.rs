use crate::Adapter;
use bar_config::TodoConfig;
use bar_core::{BarError, Block, BlockHandle, Result};
use bar_system::{count_file_lines, format_todo, todo::TODO_GLYPH, watch_file};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::process::Command;
use tracing::{debug, warn};

/// The editor command line with the todo file appended.
pub fn editor_command(editor: &[String], path: &Path) -> Result<Command> {
    let (program, args) = editor
        .split_first()
        .ok_or_else(|| BarError::Config("todo editor command is empty".into()))?;
    let mut cmd = Command::new(program);
    cmd.args(args).arg(path);
    Ok(cmd)
}

/// Start the editor without waiting for it; the exit status is logged.
async fn open_editor(editor: Arc<Vec<String>>, path: Arc<PathBuf>) -> Result<()> {
    let mut child = editor_command(&editor, &path)?
        .spawn()
        .map_err(|e| BarError::Action(format!("spawning {}: {e}", editor.join(" "))))?;

    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) if status.success() => debug!("todo editor exited"),
            Ok(status) => warn!("todo editor exited with {status}"),
            Err(e) => warn!("waiting for todo editor: {e}"),
        }
    });
    Ok(())
}

/// Clicking opens the todo file in the configured editor.
pub fn block(cfg: &TodoConfig) -> Result<Block> {
    // Reject an empty command before it can be clicked.
    editor_command(&cfg.editor, Path::new(""))?;

    let editor = Arc::new(cfg.editor.clone());
    let path = Arc::new(cfg.effective_path());
    Ok(Block::new("todo", cfg.width)
        .with_align(cfg.align)
        .with_text(TODO_GLYPH.to_string())
        .on_click(move || open_editor(editor.clone(), path.clone())))
}

async fn recount(handle: &BlockHandle, path: &Path) {
    match count_file_lines(path).await {
        Ok(n) => {
            handle.update(format_todo(n)).await;
        }
        Err(e) => warn!("{e}"),
    }
}

/// Count the file's lines now and again after every write to it.
pub fn adapter(handle: BlockHandle, cfg: TodoConfig) -> Adapter {
    Adapter::new("todo", async move {
        let path = cfg.effective_path();
        recount(&handle, &path).await;

        let mut writes = watch_file(&path);
        while writes.recv().await.is_some() {
            recount(&handle, &path).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bar_core::{redraw, Button};

    #[test]
    fn editor_gets_path_appended() {
        let cfg = TodoConfig::default();
        let cmd = editor_command(&cfg.editor, Path::new("/home/me/.todo")).unwrap();
        let inner = cmd.as_std();
        assert_eq!(inner.get_program(), "st");
        let args: Vec<_> = inner.get_args().collect();
        assert_eq!(args, ["micro", "-savecursor", "false", "/home/me/.todo"]);
    }

    #[test]
    fn empty_editor_is_config_error() {
        let cfg = TodoConfig {
            editor: Vec::new(),
            ..TodoConfig::default()
        };
        assert!(matches!(block(&cfg), Err(BarError::Config(_))));
    }

    #[test]
    fn block_shows_glyph_and_is_clickable() {
        let b = block(&TodoConfig::default()).unwrap();
        assert_eq!(b.width(), 29);
        assert_eq!(b.text(), "¢");
        assert!(b.action(Button::Left).is_some());
    }

    #[tokio::test]
    async fn missing_editor_fails_the_action() {
        let cfg = TodoConfig {
            editor: vec!["/nonexistent/blockbar-editor".into()],
            ..TodoConfig::default()
        };
        let b = block(&cfg).unwrap();
        let res = b.action(Button::Left).unwrap().invoke().await;
        assert!(matches!(res, Err(BarError::Action(_))));
    }

    #[tokio::test]
    async fn recount_updates_text() {
        let path = std::env::temp_dir().join(format!("blockbar-todo-block-{}", std::process::id()));
        std::fs::write(&path, "a\nb\nc\n").unwrap();

        let b = block(&TodoConfig::default()).unwrap();
        let (tx, mut rx) = redraw::channel();
        tokio::spawn(async move { while rx.recv().await.is_some() {} });

        recount(&b.handle(tx), &path).await;
        assert_eq!(b.text(), "¢ 3");
        assert!(b.is_dirty());
        std::fs::remove_file(&path).unwrap();
    }
}
