//! Type-safe key bindings for the data grid.
//!
//! A [`Binding`] groups one or more key presses under a single action and
//! carries the help text shown in the grid's footer. Bindings can be built
//! directly or with the option-style constructors:
//!
//! ```rust
//! use bubbletea_datagrid::key::{new_binding, with_help, with_keys_str};
//!
//! let sort = new_binding(vec![with_keys_str(&["s", "enter"]), with_help("s", "sort")]);
//! assert_eq!(sort.help().key, "s");
//! assert_eq!(sort.keys().len(), 2);
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Named keys understood by [`with_keys_str`].
static NAMED_KEYS: Lazy<HashMap<&'static str, KeyCode>> = Lazy::new(|| {
    HashMap::from([
        ("enter", KeyCode::Enter),
        ("esc", KeyCode::Esc),
        ("escape", KeyCode::Esc),
        ("tab", KeyCode::Tab),
        ("backtab", KeyCode::BackTab),
        ("backspace", KeyCode::Backspace),
        ("delete", KeyCode::Delete),
        ("del", KeyCode::Delete),
        ("insert", KeyCode::Insert),
        ("up", KeyCode::Up),
        ("down", KeyCode::Down),
        ("left", KeyCode::Left),
        ("right", KeyCode::Right),
        ("home", KeyCode::Home),
        ("end", KeyCode::End),
        ("pgup", KeyCode::PageUp),
        ("pgdown", KeyCode::PageDown),
        ("pgdn", KeyCode::PageDown),
        ("space", KeyCode::Char(' ')),
        ("f2", KeyCode::F(2)),
    ])
});

/// A single key press: a key code plus its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// The key itself.
    pub code: KeyCode,
    /// Modifiers that must be held. `SHIFT` is ignored when matching characters.
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    /// Parses a key spec such as `"ctrl+d"`, `"pgup"` or `"x"`.
    ///
    /// Returns `None` for specs that name no known key.
    pub fn parse(spec: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let mut rest = spec;
        loop {
            if let Some(r) = rest.strip_prefix("ctrl+") {
                modifiers |= KeyModifiers::CONTROL;
                rest = r;
            } else if let Some(r) = rest.strip_prefix("alt+") {
                modifiers |= KeyModifiers::ALT;
                rest = r;
            } else if let Some(r) = rest.strip_prefix("shift+") {
                modifiers |= KeyModifiers::SHIFT;
                rest = r;
            } else {
                break;
            }
        }

        if let Some(code) = NAMED_KEYS.get(rest) {
            return Some(Self {
                code: *code,
                modifiers,
            });
        }

        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Self {
                code: KeyCode::Char(c),
                modifiers,
            }),
            _ => None,
        }
    }

    fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.code != code {
            return false;
        }
        if matches!(code, KeyCode::Char(_)) {
            let relevant = KeyModifiers::CONTROL | KeyModifiers::ALT;
            (self.modifiers & relevant) == (modifiers & relevant)
        } else {
            self.modifiers == modifiers
        }
    }
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

/// Help text for a binding: the key label and what it does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short key label, e.g. `"←/h"`.
    pub key: String,
    /// Description of the action.
    pub desc: String,
}

/// A set of key presses bound to one action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding from key codes or `(code, modifiers)` pairs.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help label and description.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// The key presses this binding responds to.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Help text for this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Enables or disables the binding. Disabled bindings never match.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Whether the binding is enabled and has at least one key.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Whether the key message triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled()
            && self
                .keys
                .iter()
                .any(|k| k.matches(msg.key, msg.modifiers))
    }
}

/// A builder step for [`new_binding`].
pub type BindingOpt = Box<dyn FnOnce(&mut Binding)>;

/// Builds a binding from option steps.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        opt(&mut binding);
    }
    binding
}

/// Adds keys parsed from string specs. Unknown specs are skipped.
pub fn with_keys_str(specs: &[&str]) -> BindingOpt {
    let keys: Vec<KeyPress> = specs.iter().filter_map(|s| KeyPress::parse(s)).collect();
    Box::new(move |b: &mut Binding| b.keys.extend(keys))
}

/// Adds keys given as key presses.
pub fn with_keys(keys: Vec<KeyPress>) -> BindingOpt {
    Box::new(move |b: &mut Binding| b.keys.extend(keys))
}

/// Sets help text.
pub fn with_help(key: &str, desc: &str) -> BindingOpt {
    let help = Help {
        key: key.to_string(),
        desc: desc.to_string(),
    };
    Box::new(move |b: &mut Binding| b.help = help)
}

/// Starts the binding disabled.
pub fn with_disabled() -> BindingOpt {
    Box::new(|b: &mut Binding| b.disabled = true)
}

/// Returns true if the message matches any of the bindings.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Bindings a component exposes for help rendering.
pub trait KeyMap {
    /// Essential bindings, shown on a single line.
    fn short_help(&self) -> Vec<&Binding>;
    /// All bindings grouped into columns.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}
