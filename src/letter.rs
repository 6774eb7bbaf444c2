//! Letter renderer: single-character type and delete steps.

use crate::container::TextContainer;

/// Outcome of a single letter step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step mutated the container and more steps remain.
    Continue,
    /// The operation is complete; no further steps will mutate anything.
    Done,
}

/// Direction of a letter operation.
#[derive(Clone, Debug, PartialEq, Eq)]
enum LetterMode {
    /// Append the characters of a target string, in order.
    Type { target: Vec<char> },
    /// Remove trailing characters until the container is empty.
    Delete,
}

/// A one-character-per-step type or delete operation.
///
/// `LetterOp` manages the position within an operation but does not handle
/// timing directly. The caller is responsible for invoking [`step`] once
/// per scheduled tick and waiting [`delay_ms`] between ticks; this keeps
/// the visible typing rhythm while never blocking the host.
///
/// Appends are additive: a type operation appends to whatever content the
/// container already holds. Deletes remove the trailing character of the
/// current content regardless of how it got there.
///
/// [`step`]: LetterOp::step
/// [`delay_ms`]: LetterOp::delay_ms
///
/// ## Example
///
/// ```rust
/// use typecycle::{LetterOp, StepOutcome, TextBuffer, TextContainer};
///
/// let mut buf = TextBuffer::new();
/// let mut op = LetterOp::type_text("Hi", 80);
///
/// assert_eq!(op.step(&mut buf), StepOutcome::Continue);
/// assert_eq!(buf.text(), "H");
/// assert_eq!(op.step(&mut buf), StepOutcome::Done);
/// assert_eq!(buf.text(), "Hi");
///
/// let mut op = LetterOp::delete(30);
/// op.step(&mut buf);
/// assert_eq!(buf.text(), "H");
/// op.step(&mut buf);
/// assert_eq!(buf.text(), "");
/// assert!(op.is_complete());
/// ```
#[derive(Clone, Debug)]
pub struct LetterOp {
    mode: LetterMode,
    /// Characters appended so far (Type mode only)
    pos: usize,
    /// Delay between steps in milliseconds
    delay_ms: u64,
    /// Number of container mutations performed
    steps_taken: usize,
    complete: bool,
}

impl LetterOp {
    /// Create a type operation for `target` with the given per-character
    /// delay.
    pub fn type_text(target: &str, delay_ms: u64) -> Self {
        Self {
            mode: LetterMode::Type {
                target: target.chars().collect(),
            },
            pos: 0,
            delay_ms,
            steps_taken: 0,
            complete: false,
        }
    }

    /// Create a delete operation with the given per-character delay.
    pub fn delete(delay_ms: u64) -> Self {
        Self {
            mode: LetterMode::Delete,
            pos: 0,
            delay_ms,
            steps_taken: 0,
            complete: false,
        }
    }

    /// Delay to wait between steps, in milliseconds.
    #[inline]
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// True once the operation has finished.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Number of container mutations performed so far.
    #[inline]
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Perform one step against the container.
    ///
    /// Type mode appends the next character of the target; delete mode
    /// removes the trailing character of the content. The step that
    /// reaches the end of the target (or empties the container) reports
    /// `Done`. Stepping a completed operation is a no-op that keeps
    /// reporting `Done`.
    pub fn step(&mut self, container: &mut dyn TextContainer) -> StepOutcome {
        if self.complete {
            return StepOutcome::Done;
        }

        match &self.mode {
            LetterMode::Type { target } => {
                if let Some(&ch) = target.get(self.pos) {
                    container.push_char(ch);
                    self.pos += 1;
                    self.steps_taken += 1;
                }
                if self.pos >= target.len() {
                    self.complete = true;
                    StepOutcome::Done
                } else {
                    StepOutcome::Continue
                }
            }
            LetterMode::Delete => {
                if container.char_len() > 0 {
                    container.pop_char();
                    self.steps_taken += 1;
                }
                if container.char_len() == 0 {
                    self.complete = true;
                    StepOutcome::Done
                } else {
                    StepOutcome::Continue
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::TextBuffer;

    #[test]
    fn test_type_monotonic_prefix() {
        let phrase = "hello";
        let mut buf = TextBuffer::new();
        let mut op = LetterOp::type_text(phrase, 10);

        for k in 1..=phrase.len() {
            op.step(&mut buf);
            assert_eq!(buf.text(), &phrase[..k]);
        }
        assert!(op.is_complete());
        assert_eq!(op.steps_taken(), phrase.len());
        assert_eq!(buf.text(), phrase);
    }

    #[test]
    fn test_delete_monotonic_suffix_truncation() {
        let content = "hello";
        let mut buf = TextBuffer::with_text(content);
        let mut op = LetterOp::delete(5);

        for k in 1..=content.len() {
            op.step(&mut buf);
            assert_eq!(buf.text(), &content[..content.len() - k]);
        }
        assert!(op.is_complete());
        assert_eq!(op.steps_taken(), content.len());
    }

    #[test]
    fn test_type_is_additive() {
        let mut buf = TextBuffer::with_text("> ");
        let mut op = LetterOp::type_text("ok", 0);
        while op.step(&mut buf) == StepOutcome::Continue {}
        assert_eq!(buf.text(), "> ok");
    }

    #[test]
    fn test_type_unicode() {
        let mut buf = TextBuffer::new();
        let mut op = LetterOp::type_text("héllø", 0);

        op.step(&mut buf);
        op.step(&mut buf);
        assert_eq!(buf.text(), "hé");

        while op.step(&mut buf) == StepOutcome::Continue {}
        assert_eq!(buf.text(), "héllø");
        assert_eq!(op.steps_taken(), 5);
    }

    #[test]
    fn test_type_empty_target_completes_without_steps() {
        let mut buf = TextBuffer::new();
        let mut op = LetterOp::type_text("", 10);
        assert_eq!(op.step(&mut buf), StepOutcome::Done);
        assert_eq!(op.steps_taken(), 0);
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn test_delete_empty_completes_without_steps() {
        let mut buf = TextBuffer::new();
        let mut op = LetterOp::delete(10);
        assert_eq!(op.step(&mut buf), StepOutcome::Done);
        assert_eq!(op.steps_taken(), 0);
    }

    #[test]
    fn test_step_after_done_is_noop() {
        let mut buf = TextBuffer::new();
        let mut op = LetterOp::type_text("a", 10);
        assert_eq!(op.step(&mut buf), StepOutcome::Done);
        assert_eq!(op.step(&mut buf), StepOutcome::Done);
        assert_eq!(buf.text(), "a");
        assert_eq!(op.steps_taken(), 1);
    }

    #[test]
    fn test_delay_passthrough() {
        let op = LetterOp::type_text("x", 80);
        assert_eq!(op.delay_ms(), 80);
        let op = LetterOp::delete(30);
        assert_eq!(op.delay_ms(), 30);
    }
}
