use crate::pins::PinId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Map is read-only navigation; markers are inert.
    #[default]
    Explore,
    /// Map clicks place pins, markers drag, popups show edit controls.
    Edit,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Explore => Mode::Edit,
            Mode::Edit => Mode::Explore,
        }
    }

    pub fn is_edit(self) -> bool {
        self == Mode::Edit
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Edit => "Modo de Edição de Marcadores",
            Mode::Explore => "Modo de Exploração do Mapa",
        }
    }
}

/// Returns true for the key that flips the mode.
pub fn is_mode_key(text: &str) -> bool {
    matches!(text, "m" | "M")
}

/// Popup state. Pin placement is only possible in `Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// A pin's popup is open in its read view.
    Viewing { pin: PinId },
    /// A pin's popup is open in its edit view; `draft` is the text input.
    Editing { pin: PinId, draft: String },
}

impl Interaction {
    /// Pin whose popup is open, if any.
    pub fn open_pin(&self) -> Option<PinId> {
        match self {
            Interaction::Idle => None,
            Interaction::Viewing { pin } | Interaction::Editing { pin, .. } => Some(*pin),
        }
    }

    pub fn editing_pin(&self) -> Option<PinId> {
        match self {
            Interaction::Editing { pin, .. } => Some(*pin),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            Interaction::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn allows_placement(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    /// Whether this state refers to `id`.
    pub fn involves(&self, id: PinId) -> bool {
        self.open_pin() == Some(id)
    }
}
