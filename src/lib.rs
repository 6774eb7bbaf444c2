//! # typecycle
//!
//! Typing/deleting phrase-cycle animation library for text containers.
//!
//! This crate provides platform-agnostic logic for the classic hero-text
//! effect: type a phrase one character at a time, pause, delete it one
//! character at a time, advance to the next phrase, forever. It is split
//! into:
//!
//! - Letter rendering ([`LetterOp`]): single-character type/delete steps
//! - Cycle sequencing ([`CycleController`]): the type/wait/delete state
//!   machine with wrapping phrase index and first-run semantics
//! - Containers ([`TextContainer`], [`ContainerRegistry`]): the seam to
//!   whatever holds the text (in-memory buffers, or DOM elements with the
//!   `web` feature)
//! - Driving ([`CycleDriver`], [`Clock`]): putting real time behind the
//!   steps, with a [`StopHandle`] for deterministic teardown
//!
//! The step engines never own timing: each tick performs one action and
//! reports the delay until the next, so the whole animation can be tested
//! tick by tick with no sleeping.
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for configuration
//! - `toml` - Parse [`CycleOptions`] from TOML strings
//! - `web` - DOM-backed containers and a setTimeout-backed async driver
//!
//! ## Example
//!
//! ```rust
//! use typecycle::{CycleController, CycleOptions, MemoryDom, Tick};
//!
//! let mut dom = MemoryDom::new();
//! dom.insert("hero-text", "");
//!
//! let options = CycleOptions::new(
//!     "hero-text",
//!     vec!["Developer".into(), "Designer".into()],
//! );
//! let mut controller = CycleController::new(&options).unwrap();
//!
//! // Drive from your timer: perform a tick, wait the returned delay.
//! while let Tick::Next { delay_ms } = controller.tick(&mut dom) {
//!     let _ = delay_ms; // hand to your timer facility
//!     if dom.text_of("hero-text").unwrap() == "Developer" {
//!         break;
//!     }
//! }
//! ```

mod container;
mod cycle;
mod driver;
mod letter;
mod options;
mod phrase;

pub use container::{ContainerRegistry, MemoryDom, TextBuffer, TextContainer};
pub use cycle::{CycleController, CyclePhase, Tick};
pub use driver::{
    delete_from, stagger_delays, type_into, Clock, CycleDriver, ManualClock, StopHandle,
    SystemClock,
};
pub use letter::{LetterOp, StepOutcome};
pub use options::{CycleOptions, CycleTiming, OptionsError};
pub use phrase::PhraseList;

#[cfg(feature = "web")]
pub use container::web::{DomContainer, DomRegistry};
#[cfg(feature = "web")]
pub use driver::web::{run_cycle, spawn_cycle, timeout_ms};
