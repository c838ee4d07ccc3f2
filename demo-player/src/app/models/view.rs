//! Pane focus

/// Which column receives ↑/↓
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Selector,
    Steps,
}

impl Pane {
    pub fn toggle(self) -> Self {
        match self {
            Pane::Selector => Pane::Steps,
            Pane::Steps => Pane::Selector,
        }
    }
}
