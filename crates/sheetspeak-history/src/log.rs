use std::collections::VecDeque;

/// Confirmation messages of the instructions applied to the current dataset,
/// most recent first.
///
/// Entries are only ever added at the front; the log is cleared when a new
/// dataset is loaded.
#[derive(Clone, Default)]
pub struct InstructionHistory {
    entries: VecDeque<String>,
    /// Maximum number of entries kept, 0 for unbounded
    max_size: usize,
}

impl InstructionHistory {
    /// Create a history keeping at most `max_size` entries (0 = unbounded)
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_size,
        }
    }

    /// Record a confirmation message as the most recent entry
    pub fn record(&mut self, message: impl Into<String>) {
        self.entries.push_front(message.into());

        // Limit log size
        if self.max_size > 0 {
            self.entries.truncate(self.max_size);
        }
    }

    /// The most recent message
    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Messages from newest to oldest
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl std::fmt::Debug for InstructionHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstructionHistory")
            .field("len", &self.entries.len())
            .field("latest", &self.latest())
            .field("max_size", &self.max_size)
            .finish()
    }
}
