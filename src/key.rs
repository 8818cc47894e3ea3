//! Key bindings for windowed list controls.
//!
//! A [`Binding`] groups the key codes that trigger one action together with the
//! short help text shown for it. Bindings are matched against the `KeyMsg`
//! values delivered by the bubbletea-rs runtime.

use bubbletea_rs::KeyMsg;
use crossterm::event::KeyCode;

/// Help text attached to a binding, e.g. `("pgdn/n", "load more")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Human readable key label.
    pub key: String,
    /// What the binding does.
    pub desc: String,
}

/// A set of keys that trigger the same action.
///
/// # Examples
///
/// ```rust
/// use bubbletea_windowed_list::key::Binding;
/// use crossterm::event::KeyCode;
///
/// let more = Binding::new(vec![KeyCode::PageDown, KeyCode::Char('n')])
///     .with_help("pgdn/n", "load more");
/// assert_eq!(more.help().desc, "load more");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyCode>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding for the given key codes.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys,
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help label and description (builder pattern).
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Enables or disables the binding. Disabled bindings never match.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Returns true if the binding can currently match.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// The key codes of this binding.
    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    /// The help text of this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Returns true if `msg` carries one of this binding's keys.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.contains(&msg.key)
    }
}

/// Implemented by key maps so help views can list their bindings.
pub trait KeyMap {
    /// Bindings for the compact, single-line help view.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings grouped into columns for the expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}
