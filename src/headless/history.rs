//! In-memory history stack.

use crate::capability::HistoryMode;

/// A linear history of app-relative paths with a cursor, the headless
/// counterpart of a browser session history.
pub struct HistoryStack {
    mode: HistoryMode,
    basename: Option<String>,
    entries: Vec<String>,
    index: usize,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self {
            mode: HistoryMode::Browser,
            basename: None,
            entries: vec!["/".to_string()],
            index: 0,
        }
    }

    /// Adopt the mode and basename the router was registered with. Existing
    /// entries are kept.
    pub fn configure(&mut self, mode: HistoryMode, basename: Option<String>) {
        self.mode = mode;
        self.basename = basename;
    }

    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    /// Push a new entry, dropping any forward entries past the cursor.
    pub fn push(&mut self, to: &str) {
        let target = self.resolve(to);
        self.entries.truncate(self.index + 1);
        self.entries.push(target);
        self.index = self.entries.len() - 1;
    }

    /// Replace the current entry in place.
    pub fn replace(&mut self, to: &str) {
        let target = self.resolve(to);
        self.entries[self.index] = target;
    }

    /// Step the cursor back. Returns false at the oldest entry.
    pub fn back(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The address-bar form of the current entry: basename prefix for
    /// browser history, fragment form for hash history.
    pub fn external_url(&self) -> String {
        let path = self.current();
        match self.mode {
            HistoryMode::Hash => format!("#{path}"),
            HistoryMode::Browser => match self.basename.as_deref() {
                Some(base) => {
                    let base = base.trim_end_matches('/');
                    if path == "/" {
                        format!("{base}/")
                    } else {
                        format!("{base}{path}")
                    }
                }
                None => path.to_string(),
            },
        }
    }

    /// Absolute targets pass through; relative targets resolve against the
    /// current entry.
    fn resolve(&self, to: &str) -> String {
        let target = if to.starts_with('/') {
            to.to_string()
        } else {
            let base = self.current().trim_end_matches('/');
            format!("{base}/{to}")
        };
        normalize(&target)
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}
