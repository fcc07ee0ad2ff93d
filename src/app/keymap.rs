//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! The file holds one `<Action> = <KeySpec>` binding per line. Loading starts
//! from the defaults and layers the file's bindings on top, so a partial file
//! only changes what it mentions.

use std::collections::HashMap;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::{Context, Result};

/// Semantic keyboard actions that can be bound to key combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Move the table cursor up one row.
    MoveUp,
    /// Move the table cursor down one row.
    MoveDown,
    /// Scroll the table up one screen.
    PageUp,
    /// Scroll the table down one screen.
    PageDown,
    /// Open the detail overlay for the row under the cursor.
    Select,
    /// Remove the row under the cursor from the list.
    Remove,
    /// Close the detail overlay or the current dialog.
    Close,
    /// Open the selected user's coordinates in a map.
    OpenMap,
    /// Show the help dialog.
    OpenHelp,
    /// Swallow the key.
    Ignore,
}

const ALL_ACTIONS: [KeyAction; 11] = [
    KeyAction::Quit,
    KeyAction::MoveUp,
    KeyAction::MoveDown,
    KeyAction::PageUp,
    KeyAction::PageDown,
    KeyAction::Select,
    KeyAction::Remove,
    KeyAction::Close,
    KeyAction::OpenMap,
    KeyAction::OpenHelp,
    KeyAction::Ignore,
];

#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Arrow keys plus vim-style `j`/`k`, Enter to open, Delete or `d` to remove.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);
        bindings.insert((M::NONE, Enter), KeyAction::Select);
        bindings.insert((M::NONE, Delete), KeyAction::Remove);
        bindings.insert((M::NONE, Char('d')), KeyAction::Remove);
        bindings.insert((M::NONE, Esc), KeyAction::Close);
        bindings.insert((M::NONE, Char('o')), KeyAction::OpenMap);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        // Some terminals report '?' with SHIFT set
        bindings.insert((M::SHIFT, Char('?')), KeyAction::OpenHelp);
        Self { bindings }
    }

    /// Load a keymap from `path`, or create defaults if the file doesn't exist.
    ///
    /// A missing file is created with the default bindings so users have
    /// something to edit. A file that exists but cannot be read falls back to
    /// the defaults without touching it.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to `keybinds.conf`.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            tracing::warn!(error = %e, "could not write default keybindings");
        }
        km
    }

    /// Load a keymap from a configuration file.
    ///
    /// Bindings start from the defaults; each valid line adds to them.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the keymap configuration file.
    ///
    /// # Returns
    ///
    /// `Some(keymap)` if the file is readable; `None` otherwise.
    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Defaults overridden by every well-formed `<Action> = <KeySpec>` line.
    pub fn parse(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            match (parse_action(lhs), parse_key(rhs)) {
                (Some(action), Some(key)) => {
                    map.bindings.insert(key, action);
                }
                _ => tracing::debug!(line, "skipping keybinding line"),
            }
        }
        map
    }

    /// Render the current bindings as a `keybinds.conf` file.
    ///
    /// # Returns
    ///
    /// A commented header followed by one `<Action> = <KeySpec>` line per
    /// binding, sorted so the output is stable.
    pub fn to_config(&self) -> String {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# user-roster keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+q, Enter, Esc, Delete, Up, Down, PageUp, PageDown, j, k\n");
        buf.push_str("# Actions: ");
        let names: Vec<&str> = ALL_ACTIONS.iter().map(|a| format_action(*a)).collect();
        buf.push_str(&names.join(", "));
        buf.push_str("\n\n");

        let mut lines: Vec<String> = self
            .bindings
            .iter()
            .map(|((mods, code), action)| {
                format!("{} = {}", format_action(*action), Self::format_key(*mods, *code))
            })
            .collect();
        lines.sort();
        for line in lines {
            let _ = writeln!(&mut buf, "{line}");
        }
        buf
    }

    /// Write the current keymap to a configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Where the keymap will be written.
    ///
    /// # Returns
    ///
    /// An error naming `path` if the write failed.
    pub fn write_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_config())
            .with_ctx(|| format!("write keybindings to {}", path.display()))
    }

    /// Resolve a key event to its bound action.
    ///
    /// Modifiers must match exactly.
    ///
    /// # Arguments
    ///
    /// * `key` - The key event to resolve.
    ///
    /// # Returns
    ///
    /// The bound action, or `None` if nothing is mapped to the key.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Human-readable keys bound to `action`, sorted.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((mods, code), _)| Self::format_key(*mods, *code))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Format a key (modifiers + code) into a spec like "Ctrl+q" or "PageDown".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Backspace => "Backspace".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Home => "Home".to_string(),
            End => "End".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let (mods, rest) = match s.strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, s),
    };
    let code = match rest {
        "Enter" => Enter,
        "Delete" | "Del" => Delete,
        "Backspace" => Backspace,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        "Home" => Home,
        "End" => End,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    let name = s.trim();
    ALL_ACTIONS.into_iter().find(|a| format_action(*a) == name)
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::PageUp => "PageUp",
        KeyAction::PageDown => "PageDown",
        KeyAction::Select => "Select",
        KeyAction::Remove => "Remove",
        KeyAction::Close => "Close",
        KeyAction::OpenMap => "OpenMap",
        KeyAction::OpenHelp => "OpenHelp",
        KeyAction::Ignore => "Ignore",
    }
}
