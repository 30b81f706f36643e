use crate::connection::Response;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    Play,
    Pause,
    #[default]
    Stop,
}

/// Subset of the `status` response the bar uses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Status {
    pub state: PlayState,
    /// Seconds into the current song.
    pub elapsed: Option<f64>,
    /// Length of the current song in seconds.
    pub duration: Option<f64>,
}

impl Status {
    pub fn from_response(resp: &Response) -> Self {
        let state = match resp.get("state") {
            Some("play") => PlayState::Play,
            Some("pause") => PlayState::Pause,
            _ => PlayState::Stop,
        };
        Self {
            state,
            elapsed: resp.get("elapsed").and_then(|v| v.parse().ok()),
            duration: resp.get("duration").and_then(|v| v.parse().ok()),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.state == PlayState::Pause
    }
}

/// Subset of the `currentsong` response the bar uses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Song {
    pub file: String,
    pub artist: String,
    pub title: String,
    pub album: String,
}

impl Song {
    pub fn from_response(resp: &Response) -> Self {
        let field = |key: &str| resp.get(key).unwrap_or_default().to_string();
        Self {
            file: field("file"),
            artist: field("Artist"),
            title: field("Title"),
            album: field("Album"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_empty()
    }
}

/// `m:ss` for a duration in seconds.
pub fn format_time(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
