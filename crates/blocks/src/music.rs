use crate::popup::{NotificationPopup, PopupBody, Render};
use crate::{period, Adapter};
use bar_config::MusicConfig;
use bar_core::{Accent, Block, BlockHandle, Button, Color, HitZone, Result};
use bar_mpd::{types::format_time, Client, Connection, Song, Status};
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::{info, warn};

/// Leading glyph; the gap after it sits over the accent strip.
const LEAD: &str = "»      ";

/// Block text: `»      [paused] Artist - Title`.
pub fn music_text(status: &Status, song: &Song) -> String {
    if song.is_empty() {
        return LEAD.trim_end().to_string();
    }
    let paused = if status.is_paused() { "[paused] " } else { "" };
    format!("{LEAD}{paused}{} - {}", song.artist, song.title)
}

/// Popup content: track on the summary line, album and position below.
pub fn popup_body(status: &Status, song: &Song) -> PopupBody {
    if song.is_empty() {
        return PopupBody {
            summary: "Nothing playing".to_string(),
            body: String::new(),
        };
    }

    let summary = match (song.artist.is_empty(), song.title.is_empty()) {
        (_, true) => song.file.clone(),
        (true, false) => song.title.clone(),
        (false, false) => format!("{} - {}", song.artist, song.title),
    };

    let mut lines = Vec::new();
    if !song.album.is_empty() {
        lines.push(song.album.clone());
    }
    if let (Some(elapsed), Some(duration)) = (status.elapsed, status.duration) {
        lines.push(format!("{} / {}", format_time(elapsed), format_time(duration)));
    }
    if status.is_paused() {
        lines.push("[paused]".to_string());
    }

    PopupBody {
        summary,
        body: lines.join("\n"),
    }
}

fn render(client: Arc<Client>) -> Render {
    Arc::new(move || -> BoxFuture<'static, Result<PopupBody>> {
        let client = client.clone();
        Box::pin(async move {
            let status = client.status().await?;
            let song = client.current_song().await?;
            Ok(popup_body(&status, &song))
        })
    })
}

/// The music block: accent strip on the left, clickable only over the
/// trailing track text.
///
/// Left click toggles the track popup, right click toggles pause, scrolling
/// skips backwards and forwards.
pub fn block(cfg: &MusicConfig, client: Arc<Client>) -> Result<Block> {
    let accent: Color = cfg.accent.parse()?;
    let mut block = Block::new("music", cfg.width)
        .with_align(cfg.align)
        .with_hit_zone(HitZone::TrailingText { pad: cfg.hit_pad });
    if cfg.accent_width > 0 {
        block = block.with_accent(Accent {
            width: cfg.accent_width.min(cfg.width),
            color: accent,
        });
    }

    let slot = block.popup();
    let toggle = {
        let client = client.clone();
        move || {
            let slot = slot.clone();
            let render = render(client.clone());
            async move { slot.toggle(|| NotificationPopup::open(render)).await }
        }
    };

    Ok(block
        .on_click(toggle)
        .on(Button::Right, {
            let client = client.clone();
            move || {
                let client = client.clone();
                async move { client.toggle_pause().await }
            }
        })
        .on(Button::ScrollUp, {
            let client = client.clone();
            move || {
                let client = client.clone();
                async move { client.previous().await }
            }
        })
        .on(Button::ScrollDown, move || {
            let client = client.clone();
            async move { client.next().await }
        }))
}

async fn refresh(handle: &BlockHandle, client: &Client) {
    let (status, song) = match (client.status().await, client.current_song().await) {
        (Ok(status), Ok(song)) => (status, song),
        (Err(e), _) | (_, Err(e)) => {
            warn!("MPD query failed: {e}");
            return;
        }
    };

    if handle.update(music_text(&status, &song)).await {
        if let Err(e) = handle.popup().refresh().await {
            warn!("Music popup refresh failed: {e}");
        }
    }
}

/// Watch MPD's `player` subsystem on a dedicated connection and keep the
/// command connection alive. Lost connections are retried after
/// `retry_secs`.
pub fn adapter(handle: BlockHandle, cfg: MusicConfig, client: Arc<Client>) -> Adapter {
    Adapter::new("music", async move {
        let retry = period(cfg.retry_secs);

        let watch = async {
            loop {
                match Connection::connect(&cfg.address).await {
                    Ok(mut idle) => {
                        info!(address = %cfg.address, "Watching MPD player events");
                        loop {
                            refresh(&handle, &client).await;
                            if let Err(e) = idle.idle(&["player"]).await {
                                warn!("MPD watcher lost: {e}");
                                break;
                            }
                        }
                    }
                    Err(e) => warn!("{e}; retrying in {}s", retry.as_secs()),
                }
                tokio::time::sleep(retry).await;
            }
        };

        tokio::join!(client.keep_alive(period(cfg.keepalive_secs)), watch);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bar_core::BarError;
    use bar_mpd::PlayState;

    fn song() -> Song {
        Song {
            file: "a/b.flac".into(),
            artist: "Boards of Canada".into(),
            title: "Roygbiv".into(),
            album: "Music Has the Right to Children".into(),
        }
    }

    fn status(state: PlayState) -> Status {
        Status {
            state,
            elapsed: Some(61.0),
            duration: Some(151.0),
            ..Status::default()
        }
    }

    #[test]
    fn text_marks_paused_tracks() {
        assert_eq!(
            music_text(&status(PlayState::Play), &song()),
            "»      Boards of Canada - Roygbiv"
        );
        assert_eq!(
            music_text(&status(PlayState::Pause), &song()),
            "»      [paused] Boards of Canada - Roygbiv"
        );
        assert_eq!(music_text(&Status::default(), &Song::default()), "»");
    }

    #[test]
    fn popup_lists_album_and_position() {
        let body = popup_body(&status(PlayState::Pause), &song());
        assert_eq!(body.summary, "Boards of Canada - Roygbiv");
        assert_eq!(
            body.body,
            "Music Has the Right to Children\n1:01 / 2:31\n[paused]"
        );

        let untagged = Song {
            file: "x.mp3".into(),
            ..Song::default()
        };
        assert_eq!(popup_body(&Status::default(), &untagged).summary, "x.mp3");
    }

    #[test]
    fn block_binds_buttons_and_trailing_zone() {
        let client = Arc::new(Client::new("127.0.0.1:1"));
        let b = block(&MusicConfig::default(), client).unwrap();

        assert_eq!(b.width(), 660);
        assert_eq!(b.hit_zone(), HitZone::TrailingText { pad: 16 });
        assert_eq!(
            b.accent(),
            Some(Accent {
                width: 24,
                color: Color::rgb(0x44, 0x59, 0x67),
            })
        );
        for button in [Button::Left, Button::Right, Button::ScrollUp, Button::ScrollDown] {
            assert!(b.action(button).is_some(), "{button} unbound");
        }
        assert!(b.action(Button::Middle).is_none());
    }

    #[tokio::test]
    async fn actions_report_mpd_errors() {
        let client = Arc::new(Client::new("127.0.0.1:1"));
        let b = block(&MusicConfig::default(), client).unwrap();
        let next = b.action(Button::ScrollDown).unwrap();
        assert!(matches!(next.invoke().await, Err(BarError::Mpd(_))));
    }
}
