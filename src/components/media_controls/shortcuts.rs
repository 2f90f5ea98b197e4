// Keyboard event to shortcut mapping.

/// The parts of a `keydown` event the controllers look at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyInput {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    /// Focus is inside an input, textarea, select or contenteditable node.
    pub editable_target: bool,
    /// An IME composition is in progress.
    pub composing: bool,
}

impl KeyInput {
    pub fn plain(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    TogglePlay,
    SeekBackward,
    SeekForward,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    ToggleFullscreen,
    TogglePictureInPicture,
    SpeedUp,
    SpeedDown,
    Restart,
    JumpNearEnd,
}

/// Which key set is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutProfile {
    Audio,
    Video,
}

impl Shortcut {
    pub fn from_key(input: &KeyInput, profile: ShortcutProfile) -> Option<Shortcut> {
        if input.editable_target || input.composing {
            return None;
        }
        if input.ctrl || input.meta || input.alt {
            return None;
        }

        let key = input.key.to_lowercase();
        let shared = match key.as_str() {
            " " | "spacebar" | "k" | "mediaplaypause" => Some(Shortcut::TogglePlay),
            "arrowleft" => Some(Shortcut::SeekBackward),
            "arrowright" => Some(Shortcut::SeekForward),
            "arrowup" => Some(Shortcut::VolumeUp),
            "arrowdown" => Some(Shortcut::VolumeDown),
            "m" => Some(Shortcut::ToggleMute),
            _ => None,
        };
        if shared.is_some() || profile == ShortcutProfile::Audio {
            return shared;
        }

        match key.as_str() {
            "f" => Some(Shortcut::ToggleFullscreen),
            "p" => Some(Shortcut::TogglePictureInPicture),
            "." | ">" => Some(Shortcut::SpeedUp),
            "," | "<" => Some(Shortcut::SpeedDown),
            "0" | "home" => Some(Shortcut::Restart),
            "end" => Some(Shortcut::JumpNearEnd),
            _ => None,
        }
    }
}
