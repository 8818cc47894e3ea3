//! Key bindings for explicit load requests.

use crate::key::{Binding, KeyMap};
use crossterm::event::KeyCode;

/// Keys that ask the controller to load without scrolling.
#[derive(Debug, Clone)]
pub struct ControllerKeyMap {
    /// Extend the trailing edge. Default: PageDown, `n`.
    pub load_more: Binding,
    /// Retract the leading edge. Default: PageUp, `p`.
    pub load_previous: Binding,
}

impl Default for ControllerKeyMap {
    fn default() -> Self {
        Self {
            load_more: Binding::new(vec![KeyCode::PageDown, KeyCode::Char('n')])
                .with_help("pgdn/n", "load more"),
            load_previous: Binding::new(vec![KeyCode::PageUp, KeyCode::Char('p')])
                .with_help("pgup/p", "load previous"),
        }
    }
}

impl KeyMap for ControllerKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.load_more, &self.load_previous]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![&self.load_more, &self.load_previous]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_help() {
        let keys = ControllerKeyMap::default();
        let help: Vec<&str> = keys
            .short_help()
            .iter()
            .map(|b| b.help().desc.as_str())
            .collect();
        assert_eq!(help, vec!["load more", "load previous"]);
        assert_eq!(keys.full_help().len(), 1);
    }
}
