use std::fmt;
use std::time::{Duration, Instant};

pub const STACK_CAPACITY: usize = 8;
/// Push/pop are locked out for this long after each accepted operation.
pub const STACK_ANIMATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackRejection {
    EmptyInput,
    Full,
    Empty,
    Animating,
}

impl fmt::Display for StackRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            StackRejection::EmptyInput => "Enter a value to push",
            StackRejection::Full => "Stack is full.",
            StackRejection::Empty => "Stack is empty",
            StackRejection::Animating => "Wait for the current animation",
        };
        f.write_str(msg)
    }
}

/// Bounded LIFO stack backing the stack visualization.
#[derive(Debug, Clone)]
pub struct StackModel {
    items: Vec<String>,
    popped: Option<String>,
    busy_until: Option<Instant>,
}

impl Default for StackModel {
    fn default() -> Self {
        Self {
            items: vec!["Item 1".into(), "Item 2".into(), "Item 3".into()],
            popped: None,
            busy_until: None,
        }
    }
}

impl StackModel {
    /// Items from bottom to top.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn last_popped(&self) -> Option<&str> {
        self.popped.as_deref()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= STACK_CAPACITY
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.busy_until.is_some_and(|t| now < t)
    }

    pub fn push(&mut self, value: &str, now: Instant) -> Result<(), StackRejection> {
        if value.trim().is_empty() {
            return Err(StackRejection::EmptyInput);
        }
        if self.is_animating(now) {
            return Err(StackRejection::Animating);
        }
        if self.is_full() {
            return Err(StackRejection::Full);
        }
        self.popped = None;
        self.items.push(value.to_string());
        self.busy_until = Some(now + STACK_ANIMATION);
        Ok(())
    }

    pub fn pop(&mut self, now: Instant) -> Result<String, StackRejection> {
        if self.is_animating(now) {
            return Err(StackRejection::Animating);
        }
        let value = self.items.pop().ok_or(StackRejection::Empty)?;
        self.popped = Some(value.clone());
        self.busy_until = Some(now + STACK_ANIMATION);
        Ok(value)
    }
}
