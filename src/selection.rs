pub const DEFAULT_SELECTION_CAP: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The set was full; nothing changed.
    Rejected,
}

/// Join keys picked for side-by-side comparison, in the order they were picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    selected: Vec<String>,
    cap: usize,
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::new(DEFAULT_SELECTION_CAP)
    }
}

impl SelectionSet {
    pub fn new(cap: usize) -> Self {
        Self {
            selected: Vec::new(),
            cap,
        }
    }

    pub fn toggle(&mut self, key: &str) -> ToggleOutcome {
        if let Some(idx) = self.selected.iter().position(|k| k == key) {
            self.selected.remove(idx);
            return ToggleOutcome::Removed;
        }
        if self.selected.len() < self.cap {
            self.selected.push(key.to_string());
            ToggleOutcome::Added
        } else {
            ToggleOutcome::Rejected
        }
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selected.iter().any(|k| k == key)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn keys(&self) -> &[String] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.selected.len() >= self.cap
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}
