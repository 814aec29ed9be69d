//! Input events consumed by the editing session and their script syntax
//!
//! One event per line:
//! - `press <left|right> <x> <y>`, `move <x> <y>`, `release <x> <y>`
//! - `key <left|right|r|w|esc|space|CHAR>`
//! - `type <text>` expands into one character key per character
//!
//! Blank lines and `#` comments produce no event. Anything else becomes an
//! unknown key so the session can report it.

/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left button: selects
    Primary,
    /// Right button: deselects
    Secondary,
}

/// Pointer gesture phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// Button pressed
    Press(PointerButton),
    /// Pointer moved
    Move,
    /// Button released
    Release,
}

/// Decoded key command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// Show a different match (left arrow)
    StepBack,
    /// Return toward the original match (right arrow)
    StepForward,
    /// Copy the anchor's entry to the whole selection (`r`)
    Replace,
    /// Parse the pending buffer into new weights (`w`)
    ApplyWeights,
    /// Finish editing (escape)
    EndSession,
    /// Printable character
    Char(char),
    /// Anything unrecognised, kept verbatim for reporting
    Unknown(String),
}

impl Key {
    /// Decode a script key token
    pub fn from_token(token: &str) -> Self {
        match token {
            "left" => Self::StepBack,
            "right" => Self::StepForward,
            "r" => Self::Replace,
            "w" => Self::ApplyWeights,
            "esc" | "escape" => Self::EndSession,
            "space" => Self::Char(' '),
            _ => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Unknown(token.to_string()),
                }
            }
        }
    }
}

/// One input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer gesture at preview pixel coordinates
    Pointer {
        /// Gesture phase
        action: PointerAction,
        /// Horizontal preview coordinate
        x: u32,
        /// Vertical preview coordinate
        y: u32,
    },
    /// Key command
    Key(Key),
}

fn parse_button(token: &str) -> Option<PointerButton> {
    match token {
        "left" | "primary" => Some(PointerButton::Primary),
        "right" | "secondary" => Some(PointerButton::Secondary),
        _ => None,
    }
}

fn parse_position<'a>(mut fields: impl Iterator<Item = &'a str>) -> Option<(u32, u32)> {
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    fields.next().is_none().then_some((x, y))
}

fn parse_pointer<'a>(verb: &str, mut fields: impl Iterator<Item = &'a str>) -> Option<InputEvent> {
    let action = match verb {
        "press" => PointerAction::Press(parse_button(fields.next()?)?),
        "move" => PointerAction::Move,
        "release" => PointerAction::Release,
        _ => return None,
    };
    let (x, y) = parse_position(fields)?;
    Some(InputEvent::Pointer { action, x, y })
}

/// Decode one script line into zero or more events
pub fn parse_script_line(line: &str) -> Vec<InputEvent> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Vec::new();
    }

    let (verb, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
    match verb {
        "type" => rest.chars().map(|c| InputEvent::Key(Key::Char(c))).collect(),
        "key" => {
            let token = rest.trim();
            if token.is_empty() {
                vec![InputEvent::Key(Key::Unknown(trimmed.to_string()))]
            } else {
                vec![InputEvent::Key(Key::from_token(token))]
            }
        }
        _ => vec![
            parse_pointer(verb, rest.split_whitespace())
                .unwrap_or_else(|| InputEvent::Key(Key::Unknown(trimmed.to_string()))),
        ],
    }
}
