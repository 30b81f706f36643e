use serde::Deserialize;

/// Events from the Hyprland event socket (`.socket2.sock`) the bar reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HyprlandEvent {
    /// Focused workspace changed.
    Workspace { id: u32, name: String },
    /// Focused window changed; both fields empty when nothing is focused.
    ActiveWindow { class: String, title: String },
    /// Any other event, with the raw line kept for debugging.
    Unknown(String),
}

/// JSON shape of `j/activewindow`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActiveWindow {
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub title: String,
}

/// JSON shape of `j/activeworkspace`.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceRef {
    pub id: i32,
    pub name: String,
}

/// Parse a raw IPC event line into a typed [`HyprlandEvent`].
///
/// Hyprland events have the format `event_name>>event_data`.
pub fn parse_event(line: &str) -> HyprlandEvent {
    let Some((event, data)) = line.split_once(">>") else {
        return HyprlandEvent::Unknown(line.to_string());
    };

    match event {
        // workspacev2 carries "id,name"; plain workspace carries only the name.
        "workspacev2" => {
            let (id, name) = data.split_once(',').unwrap_or((data, data));
            match id.trim().parse() {
                Ok(id) => HyprlandEvent::Workspace {
                    id,
                    name: name.trim().to_string(),
                },
                Err(_) => HyprlandEvent::Unknown(line.to_string()),
            }
        }
        "workspace" => match data.trim().parse() {
            Ok(id) => HyprlandEvent::Workspace {
                id,
                name: data.trim().to_string(),
            },
            Err(_) => HyprlandEvent::Unknown(line.to_string()),
        },
        "activewindow" => {
            let (class, title) = data.split_once(',').unwrap_or((data, ""));
            HyprlandEvent::ActiveWindow {
                class: class.trim().to_string(),
                title: title.trim().to_string(),
            }
        }
        _ => HyprlandEvent::Unknown(line.to_string()),
    }
}
