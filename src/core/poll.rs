//! Poll loop driving snapshot builds and renders on a fixed cadence

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use log::{trace, warn};

use crate::core::{DisplaySurface, RegisterBus};
use crate::displayers::Dashboard;
use crate::sources::ChargerSource;

/// Lifecycle state of the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

/// Drives one snapshot build and one render per cycle on a constant cadence.
///
/// A failed snapshot renders an error banner for that cycle and the loop
/// carries on; transient bus faults must never take the dashboard down. The
/// stop signal is checked only between cycles, never mid-snapshot, so
/// cancellation latency is bounded by one cycle plus the poll interval.
pub struct PollLoop {
    source: ChargerSource,
    dashboard: Dashboard,
    interval: Duration,
    state: LoopState,
}

impl PollLoop {
    pub fn new(source: ChargerSource, dashboard: Dashboard, interval: Duration) -> Self {
        PollLoop {
            source,
            dashboard,
            interval,
            state: LoopState::Running,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Run until `should_stop` returns true.
    pub fn run<F>(
        &mut self,
        bus: &mut dyn RegisterBus,
        surface: &mut dyn DisplaySurface,
        mut should_stop: F,
    ) -> Result<()>
    where
        F: FnMut() -> bool,
    {
        self.state = LoopState::Running;
        loop {
            let start = Instant::now();
            match self.source.sample(bus) {
                Ok(snapshot) => self.dashboard.render(&snapshot, surface)?,
                Err(e) => {
                    warn!("snapshot aborted: {e:#}");
                    self.dashboard.render_error(&e, surface)?;
                }
            }
            trace!("poll cycle took {:?}", start.elapsed());

            if should_stop() {
                self.state = LoopState::Stopped;
                return Ok(());
            }
            thread::sleep(self.interval);
        }
    }
}
