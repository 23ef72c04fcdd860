use crate::types::MovieRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PlayerState {
    #[default]
    Closed,
    Playing { source: String },
}

/// Playback overlay. While open, background scrolling is locked; closing
/// clears the source so hidden media stops buffering.
#[derive(Debug, Clone, Default)]
pub struct Player {
    state: PlayerState,
    scroll_locked: bool,
}

impl Player {
    pub fn new() -> Self { Self::default() }

    pub fn state(&self) -> &PlayerState { &self.state }
    pub fn is_open(&self) -> bool { matches!(self.state, PlayerState::Playing { .. }) }
    pub fn scroll_locked(&self) -> bool { self.scroll_locked }

    pub fn source(&self) -> Option<&str> {
        match &self.state {
            PlayerState::Playing { source } => Some(source.as_str()),
            PlayerState::Closed => None,
        }
    }

    /// Start playing `m`. Records without a video source leave the player untouched.
    pub fn watch(&mut self, m: &MovieRecord) -> bool {
        let Some(src) = m.video_source() else {
            tracing::debug!(id = %m.id, "no video source; watch ignored");
            return false;
        };
        self.state = PlayerState::Playing { source: src.to_string() };
        self.scroll_locked = true;
        true
    }

    pub fn close(&mut self) {
        self.state = PlayerState::Closed;
        self.scroll_locked = false;
    }
}
