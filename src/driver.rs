//! Clocks and drivers that put real time behind the step engines.
//!
//! The controller and letter operations are timing-free; this module
//! supplies the timer facility ([`Clock`]) and the composition layer that
//! runs them to completion: [`type_into`] / [`delete_from`] for one-shot
//! operations and [`CycleDriver`] for the endless phrase cycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::container::ContainerRegistry;
use crate::cycle::{CycleController, Tick};
use crate::letter::{LetterOp, StepOutcome};

/// Timer facility: wait for a number of milliseconds.
pub trait Clock {
    /// Block (or otherwise wait) for `ms` milliseconds.
    fn sleep_ms(&self, ms: u64);
}

/// Wall-clock implementation backed by `std::thread::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn sleep_ms(&self, ms: u64) {
        if ms > 0 {
            std::thread::sleep(Duration::from_millis(ms));
        }
    }
}

/// A recording clock for deterministic tests.
///
/// Never waits; instead it records every requested delay so tests can
/// assert on the exact schedule a driver produced.
#[derive(Debug, Default)]
pub struct ManualClock {
    slept: std::cell::RefCell<Vec<u64>>,
}

impl ManualClock {
    /// Create a clock with no recorded delays.
    pub fn new() -> Self {
        Self::default()
    }

    /// All delays requested so far, in order.
    pub fn sleeps(&self) -> Vec<u64> {
        self.slept.borrow().clone()
    }

    /// Sum of all requested delays in milliseconds.
    pub fn total_ms(&self) -> u64 {
        self.slept.borrow().iter().sum()
    }
}

impl Clock for ManualClock {
    fn sleep_ms(&self, ms: u64) {
        self.slept.borrow_mut().push(ms);
    }
}

/// Cloneable handle that stops a running [`CycleDriver`].
///
/// The flag is shared and thread-safe, so a handle can be moved to
/// another thread (or stored in teardown code) and flipped while the
/// driver loop is sleeping between ticks; the loop observes it before the
/// next tick.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    /// Create a fresh, not-yet-stopped handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the driver to stop before its next tick.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    /// True once `stop` has been called on any clone of this handle.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

/// Runs a [`CycleController`] against a clock until it halts or is
/// stopped.
///
/// ## Example
///
/// ```rust
/// use typecycle::{CycleController, CycleOptions, CycleDriver, ManualClock, MemoryDom};
///
/// let mut dom = MemoryDom::new();
/// dom.insert("hero-text", "");
///
/// let options = CycleOptions::new("hero-text", vec!["Hi".into()]);
/// let controller = CycleController::new(&options).unwrap();
/// let mut driver = CycleDriver::new(controller, ManualClock::new());
///
/// driver.run_ticks(&mut dom, 2);
/// assert_eq!(dom.text_of("hero-text").unwrap(), "Hi");
/// assert_eq!(driver.clock().sleeps(), vec![80, 1000]);
/// ```
#[derive(Debug)]
pub struct CycleDriver<C: Clock> {
    controller: CycleController,
    clock: C,
    stop: StopHandle,
}

impl<C: Clock> CycleDriver<C> {
    /// Create a driver for the given controller and clock.
    pub fn new(controller: CycleController, clock: C) -> Self {
        Self {
            controller,
            clock,
            stop: StopHandle::new(),
        }
    }

    /// A handle that stops the running loop from elsewhere.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// The wrapped controller.
    pub fn controller(&self) -> &CycleController {
        &self.controller
    }

    /// The clock driving the loop.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run until the cycle halts or the stop handle fires.
    ///
    /// With a wall clock and a resolvable container this loops forever;
    /// call it from a dedicated thread and stop it via [`stop_handle`].
    ///
    /// [`stop_handle`]: CycleDriver::stop_handle
    pub fn run<R: ContainerRegistry + ?Sized>(&mut self, dom: &mut R) {
        loop {
            if self.stop.is_stopped() {
                self.controller.halt();
                debug!("cycle driver stopped via handle");
                return;
            }
            match self.controller.tick(dom) {
                Tick::Halted => return,
                Tick::Next { delay_ms } => self.clock.sleep_ms(delay_ms),
            }
        }
    }

    /// Run at most `max_ticks` ticks; returns the number performed.
    ///
    /// Stops early when the cycle halts or the stop handle fires.
    pub fn run_ticks<R: ContainerRegistry + ?Sized>(
        &mut self,
        dom: &mut R,
        max_ticks: usize,
    ) -> usize {
        for performed in 0..max_ticks {
            if self.stop.is_stopped() {
                self.controller.halt();
                return performed;
            }
            match self.controller.tick(dom) {
                Tick::Halted => return performed,
                Tick::Next { delay_ms } => self.clock.sleep_ms(delay_ms),
            }
        }
        max_ticks
    }
}

/// Type `text` into the container `id` one character at a time, waiting
/// `delay_ms` between characters. Returns once the full text has been
/// appended.
///
/// This is the one-shot, non-cycling reveal. If `id` does not resolve,
/// returns immediately without scheduling a single step.
pub fn type_into<R, C>(dom: &mut R, clock: &C, id: &str, text: &str, delay_ms: u64)
where
    R: ContainerRegistry + ?Sized,
    C: Clock + ?Sized,
{
    let Some(container) = dom.container_mut(id) else {
        return;
    };
    let mut op = LetterOp::type_text(text, delay_ms);
    while op.step(container) == StepOutcome::Continue {
        clock.sleep_ms(delay_ms);
    }
}

/// Delete the content of container `id` one trailing character at a time,
/// waiting `delay_ms` between characters. Returns once the container is
/// empty, or immediately when `id` does not resolve.
pub fn delete_from<R, C>(dom: &mut R, clock: &C, id: &str, delay_ms: u64)
where
    R: ContainerRegistry + ?Sized,
    C: Clock + ?Sized,
{
    let Some(container) = dom.container_mut(id) else {
        return;
    };
    let mut op = LetterOp::delete(delay_ms);
    while op.step(container) == StepOutcome::Continue {
        clock.sleep_ms(delay_ms);
    }
}

/// Arithmetic delay sequence for revealing a batch of elements one after
/// another: `[0, step_ms, 2 * step_ms, ...]`, `count` entries.
pub fn stagger_delays(count: usize, step_ms: u64) -> Vec<u64> {
    (0..count as u64).map(|i| i * step_ms).collect()
}

/// Web-specific driving: setTimeout-backed waiting and page-bound cycles.
#[cfg(feature = "web")]
pub mod web {
    use wasm_bindgen_futures::JsFuture;

    use crate::container::web::DomRegistry;
    use crate::cycle::{CycleController, Tick};
    use crate::options::{CycleOptions, OptionsError};

    /// Resolve after `ms` milliseconds via the host page's `setTimeout`.
    pub async fn timeout_ms(ms: u64) {
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            if let Some(window) = web_sys::window() {
                let _ = window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32);
            }
        });
        let _ = JsFuture::from(promise).await;
    }

    /// Drive a cycle against the current page's DOM until it halts.
    ///
    /// Returns `Ok(())` when the cycle halts (container missing) or when
    /// there is no browsing context at all.
    pub async fn run_cycle(options: &CycleOptions) -> Result<(), OptionsError> {
        let mut controller = CycleController::new(options)?;
        let Some(mut dom) = DomRegistry::for_window() else {
            return Ok(());
        };
        loop {
            match controller.tick(&mut dom) {
                Tick::Halted => return Ok(()),
                Tick::Next { delay_ms } => timeout_ms(delay_ms).await,
            }
        }
    }

    /// Start a cycle on the current page once its structure is ready.
    ///
    /// Scheduled work is simply abandoned when the page is torn down;
    /// no explicit cancellation is needed on unload.
    pub fn spawn_cycle(options: CycleOptions) {
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = run_cycle(&options).await {
                log::warn!("cycle not started: {}", err);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::MemoryDom;
    use crate::options::{CycleOptions, CycleTiming};

    fn dom_with(id: &str, text: &str) -> MemoryDom {
        let mut dom = MemoryDom::new();
        dom.insert(id, text);
        dom
    }

    #[test]
    fn test_type_into_completes_fully() {
        let mut dom = dom_with("t", "");
        let clock = ManualClock::new();

        type_into(&mut dom, &clock, "t", "abc", 7);

        assert_eq!(dom.text_of("t").unwrap(), "abc");
        // A sleep between each pair of characters, none after the last.
        assert_eq!(clock.sleeps(), vec![7, 7]);
    }

    #[test]
    fn test_delete_from_empties() {
        let mut dom = dom_with("t", "abc");
        let clock = ManualClock::new();

        delete_from(&mut dom, &clock, "t", 3);

        assert_eq!(dom.text_of("t").unwrap(), "");
        assert_eq!(clock.sleeps(), vec![3, 3]);
    }

    #[test]
    fn test_missing_container_is_silent_noop() {
        let mut dom = MemoryDom::new();
        let clock = ManualClock::new();

        type_into(&mut dom, &clock, "absent", "abc", 7);
        delete_from(&mut dom, &clock, "absent", 3);

        // No steps were scheduled at all.
        assert!(clock.sleeps().is_empty());
    }

    #[test]
    fn test_driver_schedule_matches_controller_delays() {
        let timing = CycleTiming {
            type_delay_ms: 10,
            delete_delay_ms: 5,
            phrase_wait_ms: 100,
            restart_delay_ms: 50,
        };
        let options = CycleOptions::new("t", vec!["Hi".into()]).with_timing(timing);
        let controller = CycleController::new(&options).unwrap();
        let mut driver = CycleDriver::new(controller, ManualClock::new());
        let mut dom = dom_with("t", "");

        // One full cycle: H, Hi(done), wait tick, H, ""(done) = 5 ticks.
        let performed = driver.run_ticks(&mut dom, 5);
        assert_eq!(performed, 5);
        assert_eq!(driver.clock().sleeps(), vec![10, 50, 100, 5, 0]);
        assert_eq!(dom.text_of("t").unwrap(), "");
    }

    #[test]
    fn test_driver_run_returns_on_missing_container() {
        let options = CycleOptions::new("absent", vec!["Hi".into()]);
        let controller = CycleController::new(&options).unwrap();
        let mut driver = CycleDriver::new(controller, ManualClock::new());
        let mut dom = MemoryDom::new();

        driver.run(&mut dom); // halts on first tick instead of looping
        assert!(driver.controller().is_halted());
        assert!(driver.clock().sleeps().is_empty());
    }

    #[test]
    fn test_stop_handle_stops_before_next_tick() {
        let options = CycleOptions::new("t", vec!["Hi".into()]);
        let controller = CycleController::new(&options).unwrap();
        let mut driver = CycleDriver::new(controller, ManualClock::new());
        let mut dom = dom_with("t", "");

        let handle = driver.stop_handle();
        handle.stop();

        driver.run(&mut dom);
        assert!(driver.controller().is_halted());
        // Stopped before any tick ran.
        assert_eq!(dom.text_of("t").unwrap(), "");
    }

    #[test]
    fn test_stop_handle_mid_run() {
        let options = CycleOptions::new("t", vec!["Hi".into()]);
        let controller = CycleController::new(&options).unwrap();
        let mut driver = CycleDriver::new(controller, ManualClock::new());
        let mut dom = dom_with("t", "");

        driver.run_ticks(&mut dom, 1);
        assert_eq!(dom.text_of("t").unwrap(), "H");

        driver.stop_handle().stop();
        let performed = driver.run_ticks(&mut dom, 10);
        assert_eq!(performed, 0);
        assert!(driver.controller().is_halted());
    }

    #[test]
    fn test_stagger_delays() {
        assert_eq!(stagger_delays(3, 100), vec![0, 100, 200]);
        assert_eq!(stagger_delays(0, 100), Vec::<u64>::new());
        assert_eq!(stagger_delays(2, 0), vec![0, 0]);
    }
}
