use serde::{Deserialize, Serialize};

/// Front-end toggles. They gate what a snapshot exposes and never feed move
/// generation or application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiSettings {
    /// Expose the turn holder's legal targets for highlighting.
    pub show_hints: bool,
    /// Background music on/off.
    pub music: bool,
}

impl UiSettings {
    pub fn toggle_hints(&mut self) -> bool {
        self.show_hints = !self.show_hints;
        self.show_hints
    }

    pub fn toggle_music(&mut self) -> bool {
        self.music = !self.music;
        self.music
    }
}
