//! Key mapping from terminal events to game actions.
//!
//! Bindings are plain single characters and come from configuration; the
//! defaults follow the home-row layout (`j`/`l` move, `f`/`s`/`d` rotate).

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::types::GameAction;

/// Key that always quits (alongside Ctrl-C).
pub const QUIT_KEY: char = 'q';

/// One character per action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: char,
    pub move_right: char,
    pub rotate_cw: char,
    pub rotate_ccw: char,
    pub rotate_half: char,
    pub hard_drop: char,
    pub soft_drop: char,
    pub reset: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: 'j',
            move_right: 'l',
            rotate_cw: 'f',
            rotate_ccw: 's',
            rotate_half: 'd',
            hard_drop: ' ',
            soft_drop: 'k',
            reset: 'r',
        }
    }
}

/// Invalid binding set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// Two actions share a key.
    Duplicate {
        key: char,
        first: GameAction,
        second: GameAction,
    },
    /// The key is reserved for quitting.
    Reserved { key: char, action: GameAction },
    /// Control characters cannot be typed as single keys.
    Unprintable { action: GameAction },
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::Duplicate { key, first, second } => write!(
                f,
                "key {:?} is bound to both {} and {}",
                key,
                first.as_str(),
                second.as_str()
            ),
            BindingError::Reserved { key, action } => {
                write!(f, "key {:?} for {} is reserved for quit", key, action.as_str())
            }
            BindingError::Unprintable { action } => {
                write!(f, "binding for {} is a control character", action.as_str())
            }
        }
    }
}

impl std::error::Error for BindingError {}

fn same_key(a: char, b: char) -> bool {
    a.to_lowercase().eq(b.to_lowercase())
}

impl KeyBindings {
    pub fn key_for(&self, action: GameAction) -> char {
        match action {
            GameAction::MoveLeft => self.move_left,
            GameAction::MoveRight => self.move_right,
            GameAction::RotateCw => self.rotate_cw,
            GameAction::RotateCcw => self.rotate_ccw,
            GameAction::RotateHalf => self.rotate_half,
            GameAction::HardDrop => self.hard_drop,
            GameAction::SoftDrop => self.soft_drop,
            GameAction::Reset => self.reset,
        }
    }

    pub fn set(&mut self, action: GameAction, key: char) {
        let slot = match action {
            GameAction::MoveLeft => &mut self.move_left,
            GameAction::MoveRight => &mut self.move_right,
            GameAction::RotateCw => &mut self.rotate_cw,
            GameAction::RotateCcw => &mut self.rotate_ccw,
            GameAction::RotateHalf => &mut self.rotate_half,
            GameAction::HardDrop => &mut self.hard_drop,
            GameAction::SoftDrop => &mut self.soft_drop,
            GameAction::Reset => &mut self.reset,
        };
        *slot = key;
    }

    /// Map a typed character to its action. Letters match either case;
    /// unbound keys yield `None`.
    pub fn action_for(&self, key: char) -> Option<GameAction> {
        GameAction::ALL
            .into_iter()
            .find(|&action| same_key(self.key_for(action), key))
    }

    /// Reject duplicate, reserved or unprintable bindings.
    pub fn validate(&self) -> Result<(), BindingError> {
        for (i, &first) in GameAction::ALL.iter().enumerate() {
            let key = self.key_for(first);
            if key.is_control() {
                return Err(BindingError::Unprintable { action: first });
            }
            if same_key(key, QUIT_KEY) {
                return Err(BindingError::Reserved { key, action: first });
            }
            for &second in &GameAction::ALL[i + 1..] {
                if same_key(key, self.key_for(second)) {
                    return Err(BindingError::Duplicate { key, first, second });
                }
            }
        }
        Ok(())
    }
}

/// Character carried by a key press, if it is a plain character key.
///
/// Releases, repeats, modified chords and non-character keys are dropped.
pub fn key_char(key: KeyEvent) -> Option<char> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    matches!(key.code, KeyCode::Char(c) if same_key(c, QUIT_KEY))
        && !key.modifiers.contains(KeyModifiers::CONTROL)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for('j'), Some(GameAction::MoveLeft));
        assert_eq!(keys.action_for('l'), Some(GameAction::MoveRight));
        assert_eq!(keys.action_for('f'), Some(GameAction::RotateCw));
        assert_eq!(keys.action_for('s'), Some(GameAction::RotateCcw));
        assert_eq!(keys.action_for('d'), Some(GameAction::RotateHalf));
        assert_eq!(keys.action_for(' '), Some(GameAction::HardDrop));
        assert_eq!(keys.action_for('k'), Some(GameAction::SoftDrop));
        assert_eq!(keys.action_for('r'), Some(GameAction::Reset));
        assert!(keys.validate().is_ok());
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for('x'), None);
        assert_eq!(keys.action_for('q'), None);
    }

    #[test]
    fn test_letters_match_either_case() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for('J'), Some(GameAction::MoveLeft));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut keys = KeyBindings::default();
        keys.set(GameAction::Reset, 'J');
        assert_eq!(
            keys.validate(),
            Err(BindingError::Duplicate {
                key: 'j',
                first: GameAction::MoveLeft,
                second: GameAction::Reset,
            })
        );
    }

    #[test]
    fn test_quit_key_reserved() {
        let mut keys = KeyBindings::default();
        keys.set(GameAction::HardDrop, 'q');
        assert!(matches!(
            keys.validate(),
            Err(BindingError::Reserved { key: 'q', .. })
        ));
    }

    #[test]
    fn test_control_char_rejected() {
        let mut keys = KeyBindings::default();
        keys.set(GameAction::SoftDrop, '\n');
        assert_eq!(
            keys.validate(),
            Err(BindingError::Unprintable {
                action: GameAction::SoftDrop
            })
        );
    }

    #[test]
    fn test_key_char_filters_events() {
        assert_eq!(key_char(KeyEvent::from(KeyCode::Char('j'))), Some('j'));
        assert_eq!(key_char(KeyEvent::from(KeyCode::Left)), None);
        assert_eq!(
            key_char(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(
            key_char(KeyEvent::new(KeyCode::Char('J'), KeyModifiers::SHIFT)),
            Some('J')
        );

        let mut release = KeyEvent::from(KeyCode::Char('j'));
        release.kind = KeyEventKind::Release;
        assert_eq!(key_char(release), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Char('Q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
