//! Phrase cycle controller: type, wait, delete, repeat.

use log::{debug, warn};

use crate::container::ContainerRegistry;
use crate::letter::{LetterOp, StepOutcome};
use crate::options::{CycleOptions, CycleTiming, OptionsError};
use crate::phrase::PhraseList;

/// Current phase of the cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CyclePhase {
    /// Appending characters of the current phrase
    Typing,
    /// Full phrase visible, pausing before deletion
    Waiting,
    /// Removing characters of the just-typed phrase
    Deleting,
    /// Cycle stopped; no further work will be scheduled
    Halted,
}

/// Result of one controller tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Schedule the next tick after `delay_ms` milliseconds.
    Next {
        /// Delay until the next tick, in milliseconds
        delay_ms: u64,
    },
    /// The cycle has halted; do not reschedule.
    Halted,
}

/// Sequences letter operations across an ordered phrase list.
///
/// The controller is a discrete-event state machine: each call to
/// [`tick`] performs exactly one scheduled action (append a character,
/// remove a character, or mark a pause elapsed) and reports how long to
/// wait before the next tick. It manages sequencing but never owns
/// timing; drive it from a timer at the returned delays, or call it in a
/// tight loop in tests.
///
/// The first phrase is typed immediately with no leading wait or delete.
/// After a phrase finishes typing, the cycle reschedules after the
/// restart delay, pauses for the phrase wait, deletes the phrase one
/// character at a time, advances the index (wrapping), and types the next
/// phrase. There is no terminal state except [`halt`] or a container that
/// fails to resolve.
///
/// Because ticks are the only way the machine advances, at most one
/// letter-level operation is ever in flight for the bound container.
///
/// [`tick`]: CycleController::tick
/// [`halt`]: CycleController::halt
///
/// ## Example
///
/// ```rust
/// use typecycle::{CycleController, CycleOptions, MemoryDom, Tick};
///
/// let mut dom = MemoryDom::new();
/// dom.insert("hero-text", "");
///
/// let options = CycleOptions::new("hero-text", vec!["Hi".into()]);
/// let mut controller = CycleController::new(&options).unwrap();
///
/// // First tick types the first character immediately.
/// let tick = controller.tick(&mut dom);
/// assert_eq!(dom.text_of("hero-text").unwrap(), "H");
/// assert_eq!(tick, Tick::Next { delay_ms: 80 });
/// ```
#[derive(Clone, Debug)]
pub struct CycleController {
    container_id: String,
    phrases: PhraseList,
    timing: CycleTiming,
    phase: CyclePhase,
    /// Current phrase index, wraps modulo the list length
    index: usize,
    /// True until the first phrase has finished typing
    first_run: bool,
    /// The in-flight letter operation for the current phase
    op: LetterOp,
    /// Total container mutations performed across all operations
    mutation_steps: usize,
}

impl CycleController {
    /// Create a controller from validated options.
    pub fn new(options: &CycleOptions) -> Result<Self, OptionsError> {
        let phrases = options.phrase_list()?;
        Ok(Self::from_parts(
            options.container_id.clone(),
            phrases,
            options.timing,
        ))
    }

    /// Create a controller from already-built parts.
    pub fn from_parts(container_id: String, phrases: PhraseList, timing: CycleTiming) -> Self {
        let op = LetterOp::type_text(phrases.get(0), timing.type_delay_ms);
        Self {
            container_id,
            phrases,
            timing,
            phase: CyclePhase::Typing,
            index: 0,
            first_run: true,
            op,
            mutation_steps: 0,
        }
    }

    /// Identifier of the bound container.
    #[inline]
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Current phrase index.
    #[inline]
    pub fn phrase_index(&self) -> usize {
        self.index
    }

    /// True until the first phrase has finished typing.
    #[inline]
    pub fn first_run(&self) -> bool {
        self.first_run
    }

    /// The timing configuration this controller was built with.
    #[inline]
    pub fn timing(&self) -> CycleTiming {
        self.timing
    }

    /// Total single-character container mutations performed so far.
    ///
    /// Every tick mutates the container by at most one character, so this
    /// counter also bounds the number of letter steps that were ever
    /// pending: one.
    #[inline]
    pub fn mutation_steps(&self) -> usize {
        self.mutation_steps
    }

    /// True once the cycle has stopped.
    #[inline]
    pub fn is_halted(&self) -> bool {
        self.phase == CyclePhase::Halted
    }

    /// Stop the cycle. Subsequent ticks report `Tick::Halted`.
    pub fn halt(&mut self) {
        self.phase = CyclePhase::Halted;
    }

    /// Perform the next scheduled action.
    ///
    /// Returns the delay to wait before calling `tick` again, or
    /// [`Tick::Halted`] once the cycle has stopped. If the bound
    /// container cannot be resolved, the cycle halts rather than spinning
    /// on no-op timers; the silently blank animation area is the accepted
    /// degraded behavior.
    pub fn tick<R: ContainerRegistry + ?Sized>(&mut self, dom: &mut R) -> Tick {
        match self.phase {
            CyclePhase::Halted => Tick::Halted,
            CyclePhase::Typing => {
                let Some(container) = dom.container_mut(&self.container_id) else {
                    return self.halt_missing();
                };
                let before = self.op.steps_taken();
                let outcome = self.op.step(container);
                self.mutation_steps += self.op.steps_taken() - before;

                match outcome {
                    StepOutcome::Continue => Tick::Next {
                        delay_ms: self.timing.type_delay_ms,
                    },
                    StepOutcome::Done => {
                        self.first_run = false;
                        self.phase = CyclePhase::Waiting;
                        debug!(
                            "phrase {} typed into '{}'; rescheduling",
                            self.index, self.container_id
                        );
                        Tick::Next {
                            delay_ms: self.timing.restart_delay_ms,
                        }
                    }
                }
            }
            CyclePhase::Waiting => {
                // The pause starts here; the content stays untouched
                // until it elapses and the first delete tick fires.
                self.phase = CyclePhase::Deleting;
                self.op = LetterOp::delete(self.timing.delete_delay_ms);
                Tick::Next {
                    delay_ms: self.timing.phrase_wait_ms,
                }
            }
            CyclePhase::Deleting => {
                let Some(container) = dom.container_mut(&self.container_id) else {
                    return self.halt_missing();
                };
                let before = self.op.steps_taken();
                let outcome = self.op.step(container);
                self.mutation_steps += self.op.steps_taken() - before;

                match outcome {
                    StepOutcome::Continue => Tick::Next {
                        delay_ms: self.timing.delete_delay_ms,
                    },
                    StepOutcome::Done => {
                        self.index = self.phrases.next_index(self.index);
                        self.phase = CyclePhase::Typing;
                        self.op =
                            LetterOp::type_text(self.phrases.get(self.index), self.timing.type_delay_ms);
                        debug!("advancing to phrase {}", self.index);
                        // Delete completion chains straight into the next
                        // type; the first character of the next phrase
                        // appears without extra delay.
                        Tick::Next { delay_ms: 0 }
                    }
                }
            }
        }
    }

    fn halt_missing(&mut self) -> Tick {
        warn!(
            "container '{}' not found; halting cycle",
            self.container_id
        );
        self.phase = CyclePhase::Halted;
        Tick::Halted
    }
}
