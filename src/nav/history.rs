use std::path::{Path, PathBuf};

/// In-memory back/forward stack over visited paths.
///
/// Purely in-memory state machine with no filesystem dependency. The stack
/// records visited paths; `index` points at the current position, `None`
/// iff the stack is empty. Entries after `index` form the forward branch
/// and are discarded when a new path is visited from a non-tip position
/// (branching history: navigating away truncates redo).
#[derive(Debug, Default, Clone)]
pub struct NavigationHistory {
    stack: Vec<PathBuf>,
    index: Option<usize>,
    current: Option<PathBuf>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        NavigationHistory::default()
    }

    /// Visit `path`, recording it in history.
    ///
    /// Truncates the forward branch first, skips the push when the tip
    /// already equals `path` (no duplicate entries), and always updates the
    /// current path, even when nothing is pushed.
    pub fn navigate(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if let Some(i) = self.index {
            self.stack.truncate(i + 1);
        }
        if self.stack.last() != Some(&path) {
            self.stack.push(path.clone());
            self.index = Some(self.stack.len() - 1);
        }
        self.current = Some(path);
    }

    /// Step back in history, yielding the previous path. The stack itself
    /// is not mutated; only the position moves.
    pub fn back(&mut self) -> Option<&Path> {
        let i = self.index?;
        if i == 0 {
            return None;
        }
        self.index = Some(i - 1);
        let path = &self.stack[i - 1];
        self.current = Some(path.clone());
        Some(path)
    }

    /// Step forward along a previously visited branch.
    pub fn forward(&mut self) -> Option<&Path> {
        let i = self.index?;
        if i + 1 >= self.stack.len() {
            return None;
        }
        self.index = Some(i + 1);
        let path = &self.stack[i + 1];
        self.current = Some(path.clone());
        Some(path)
    }

    /// True when `back` would yield a path.
    pub fn can_go_back(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    /// True when `forward` would yield a path.
    pub fn can_go_forward(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 < self.stack.len())
    }

    /// The path most recently set by `navigate`/`back`/`forward`.
    pub fn current(&self) -> Option<&Path> {
        self.current.as_deref()
    }

    /// Number of recorded history entries.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}
