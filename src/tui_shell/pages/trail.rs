use std::sync::Arc;

/// Pages visited on the way to the current detail page, oldest first.
///
/// Extending never touches the original: every page along the way keeps the
/// trail it was created with, so going back restores an exact earlier state.
#[derive(Debug)]
pub(in crate::tui_shell) struct TicketTrail<P> {
    entries: Arc<Vec<P>>,
}

impl<P> Default for TicketTrail<P> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Vec::new()),
        }
    }
}

impl<P> Clone for TicketTrail<P> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<P: Clone> TicketTrail<P> {
    /// A new trail with `page` appended.
    pub(in crate::tui_shell) fn extended(&self, page: P) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend(self.entries.iter().cloned());
        entries.push(page);
        Self {
            entries: Arc::new(entries),
        }
    }
}

impl<P> TicketTrail<P> {
    pub(in crate::tui_shell) fn last(&self) -> Option<&P> {
        self.entries.last()
    }

    pub(in crate::tui_shell) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(in crate::tui_shell) fn get(&self, i: usize) -> Option<&P> {
        self.entries.get(i)
    }

    pub(in crate::tui_shell) fn iter(&self) -> impl Iterator<Item = &P> {
        self.entries.iter()
    }
}
