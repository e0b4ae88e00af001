use regex::Regex;

/// A page's active search: the pattern typed after `/` or `?` and its direction.
#[derive(Clone, Debug, Default)]
pub(in crate::tui_shell) struct SearchState {
    pub(in crate::tui_shell) pattern: String,
    pub(in crate::tui_shell) direction_up: bool,
    matcher: Option<Regex>,
}

impl SearchState {
    /// Build from a command-bar buffer such as `/TODO` or `?fix`.
    ///
    /// An invalid or empty pattern yields a state that matches nothing.
    pub(in crate::tui_shell) fn from_command(command: &str) -> Self {
        let direction_up = command.starts_with('?');
        let pattern = command
            .strip_prefix(['/', '?'])
            .unwrap_or(command)
            .to_string();
        Self::new(pattern, direction_up)
    }

    pub(in crate::tui_shell) fn new(pattern: String, direction_up: bool) -> Self {
        let matcher = if pattern.is_empty() {
            None
        } else {
            match Regex::new(&pattern) {
                Ok(re) => Some(re),
                Err(err) => {
                    tracing::debug!("search pattern {:?} rejected: {}", pattern, err);
                    None
                }
            }
        };
        Self {
            pattern,
            direction_up,
            matcher,
        }
    }

    pub(in crate::tui_shell) fn is_active(&self) -> bool {
        self.matcher.is_some()
    }

    pub(in crate::tui_shell) fn matches(&self, line: &str) -> bool {
        self.matcher.as_ref().is_some_and(|re| re.is_match(line))
    }

    pub(in crate::tui_shell) fn reversed(&self) -> Self {
        Self {
            direction_up: !self.direction_up,
            ..self.clone()
        }
    }
}

/// Wraparound search starting next to `selected`.
///
/// Scans every other line once in the search direction and returns the first
/// match; `selected` itself is never tested. Returns `None` for an empty buffer
/// or when nothing matches.
pub(in crate::tui_shell) fn circular_search(
    lines: &[String],
    selected: usize,
    state: &SearchState,
) -> Option<usize> {
    let n = lines.len();
    if n == 0 || !state.is_active() {
        return None;
    }
    let selected = selected.min(n - 1);
    let step = |i: usize| {
        if state.direction_up {
            (i + n - 1) % n
        } else {
            (i + 1) % n
        }
    };

    let mut i = step(selected);
    while i != selected {
        if state.matches(&lines[i]) {
            return Some(i);
        }
        i = step(i);
    }
    None
}

#[cfg(test)]
#[path = "../tests/tui_shell/search_tests.rs"]
mod tests;
