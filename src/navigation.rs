//! Navigation history: one back stack per top-level destination.

use std::collections::HashMap;
use tracing::debug;

/// Destinations of the roster screens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NavKey {
    PeopleList,
    PersonInput,
    PersonDetail { id: String },
}

pub trait NavHandler {
    fn push(&mut self, destination: NavKey);
    /// Pops the last entry; the root of a stack is never popped.
    fn pop(&mut self);
    fn pop_to_root_and_navigate(&mut self, root: NavKey);
}

/// Independent back stacks keyed by their top-level destination. Switching
/// tabs keeps the history of the tab that was left.
#[derive(Debug, Clone)]
pub struct NavStack {
    stacks: HashMap<NavKey, Vec<NavKey>>,
    current_top_level: NavKey,
}

impl NavStack {
    pub fn new(start: NavKey) -> Self {
        let mut stacks = HashMap::new();
        stacks.insert(start.clone(), vec![start.clone()]);
        Self {
            stacks,
            current_top_level: start,
        }
    }

    pub fn current_top_level(&self) -> &NavKey {
        &self.current_top_level
    }

    pub fn current_stack(&self) -> &[NavKey] {
        self.stacks
            .get(&self.current_top_level)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Top of the active stack.
    pub fn current(&self) -> Option<&NavKey> {
        self.current_stack().last()
    }

    pub fn switch_top_level(&mut self, key: NavKey) {
        if key == self.current_top_level {
            debug!(nav_key = ?key, "switch_top_level: already active");
            return;
        }
        self.stacks
            .entry(key.clone())
            .or_insert_with(|| vec![key.clone()]);
        debug!(nav_key = ?key, "switch_top_level");
        self.current_top_level = key;
    }

    fn active_mut(&mut self) -> &mut Vec<NavKey> {
        let key = self.current_top_level.clone();
        self.stacks.entry(key.clone()).or_insert_with(|| vec![key])
    }
}

impl NavHandler for NavStack {
    fn push(&mut self, destination: NavKey) {
        debug!(nav_key = ?destination, "push");
        self.active_mut().push(destination);
    }

    fn pop(&mut self) {
        let stack = self.active_mut();
        if stack.len() > 1 {
            let removed = stack.pop();
            debug!(nav_key = ?removed, "pop");
        } else {
            debug!("pop: already at root");
        }
    }

    fn pop_to_root_and_navigate(&mut self, root: NavKey) {
        self.switch_top_level(root.clone());
        let stack = self.active_mut();
        stack.clear();
        stack.push(root);
        debug!("pop_to_root_and_navigate");
    }
}
