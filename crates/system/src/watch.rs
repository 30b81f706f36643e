use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Watch a single file and send a notification whenever it is written.
///
/// The parent directory is watched rather than the file itself, so editors
/// that save by renaming a temporary over the file are still seen, and a file
/// that does not exist yet is picked up once it is created.
///
/// # Example
/// ```no_run
/// # async fn demo() {
/// let mut rx = bar_system::watch_file("/home/user/.todo");
/// while rx.recv().await.is_some() {
///     println!("todo list changed");
/// }
/// # }
/// ```
pub fn watch_file(path: impl AsRef<Path>) -> mpsc::Receiver<()> {
    let (tx, rx) = mpsc::channel(1);
    tokio::spawn(watch_loop(path.as_ref().to_path_buf(), tx));
    rx
}

async fn watch_loop(path: PathBuf, tx: mpsc::Sender<()>) {
    use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
    use std::time::Duration;

    let (Some(dir), Some(name)) = (watch_dir(&path), path.file_name()) else {
        error!("Cannot watch '{}': not a file path", path.display());
        return;
    };

    let (sync_tx, mut sync_rx) = mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = sync_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return;
        }
    };

    if let Err(e) = watcher.watch(dir, RecursiveMode::NonRecursive) {
        error!("Failed to watch '{}': {e}", dir.display());
        return;
    }

    info!("Watching file: {}", path.display());

    while let Some(event) = sync_rx.recv().await {
        match event {
            Ok(e) if is_write(&e.kind) && touches(&e, name) => {
                // A full slot means a notification is already pending.
                if let Err(mpsc::error::TrySendError::Closed(())) = tx.try_send(()) {
                    break; // receiver dropped
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Watcher error: {e}"),
        }
    }
}

/// Directory holding `path`; a bare file name lives in the current directory.
fn watch_dir(path: &Path) -> Option<&Path> {
    match path.parent() {
        Some(dir) if dir.as_os_str().is_empty() => Some(Path::new(".")),
        dir => dir,
    }
}

fn touches(event: &notify::Event, name: &OsStr) -> bool {
    event.paths.iter().any(|p| p.file_name() == Some(name))
}

fn is_write(kind: &notify::EventKind) -> bool {
    use notify::event::{EventKind, ModifyKind, RenameMode};
    matches!(
        kind,
        EventKind::Modify(
            ModifyKind::Data(_)
                | ModifyKind::Any
                | ModifyKind::Name(RenameMode::To | RenameMode::Both | RenameMode::Any)
        ) | EventKind::Create(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, EventKind, ModifyKind};

    #[test]
    fn only_writes_count() {
        assert!(is_write(&EventKind::Modify(ModifyKind::Data(DataChange::Content))));
        assert!(is_write(&EventKind::Modify(ModifyKind::Any)));
        assert!(is_write(&EventKind::Create(CreateKind::File)));
        assert!(!is_write(&EventKind::Access(AccessKind::Any)));
        assert!(!is_write(&EventKind::Modify(ModifyKind::Metadata(
            notify::event::MetadataKind::Any
        ))));
    }

    #[test]
    fn rename_onto_the_file_counts() {
        use notify::event::RenameMode;
        assert!(is_write(&EventKind::Modify(ModifyKind::Name(RenameMode::To))));
        assert!(is_write(&EventKind::Modify(ModifyKind::Name(RenameMode::Both))));
        assert!(!is_write(&EventKind::Modify(ModifyKind::Name(RenameMode::From))));
    }

    #[test]
    fn events_for_siblings_are_ignored() {
        let event = notify::Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/home/me/.todo.swp"));
        assert!(!touches(&event, OsStr::new(".todo")));

        let event = event.add_path(PathBuf::from("/home/me/.todo"));
        assert!(touches(&event, OsStr::new(".todo")));
    }

    #[test]
    fn bare_name_watches_current_dir() {
        assert_eq!(watch_dir(Path::new(".todo")), Some(Path::new(".")));
        assert_eq!(watch_dir(Path::new("/home/me/.todo")), Some(Path::new("/home/me")));
        assert_eq!(watch_dir(Path::new("/")), None);
    }

    #[tokio::test]
    async fn file_created_after_start_and_replaced_by_rename_is_seen() {
        use std::time::Duration;
        use tokio::time::timeout;

        let dir = std::env::temp_dir().join(format!("bar-watch-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("todo");
        let _ = std::fs::remove_file(&path);

        let mut rx = watch_file(&path);
        tokio::time::sleep(Duration::from_millis(200)).await;

        std::fs::write(&path, "a\n").unwrap();
        timeout(Duration::from_secs(5), rx.recv()).await.unwrap().unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;
        while rx.try_recv().is_ok() {}

        let tmp = dir.join("todo.tmp");
        std::fs::write(&tmp, "a\nb\n").unwrap();
        std::fs::rename(&tmp, &path).unwrap();
        timeout(Duration::from_secs(5), rx.recv()).await.unwrap().unwrap();

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
