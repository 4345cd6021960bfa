//! Shared world state for timer overtime BDD scenarios.

use std::sync::Arc;

use planme::storage::adapters::InMemoryStore;
use planme::timer::services::TimerEngine;
use rstest::fixture;

use crate::test_helpers::{CountingTrigger, ManualClock};

/// Engine type used by the BDD world.
pub type TestEngine = TimerEngine<InMemoryStore, CountingTrigger, ManualClock>;

/// Scenario world for timer behaviour tests.
pub struct TimerWorld {
    pub store: Arc<InMemoryStore>,
    pub trigger: Arc<CountingTrigger>,
    pub clock: Arc<ManualClock>,
    pub engine: TestEngine,
}

impl TimerWorld {
    /// Creates a world with an empty store and the clock at minute zero.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let trigger = Arc::new(CountingTrigger::default());
        let clock = Arc::new(ManualClock::new());
        let engine = TimerEngine::new(
            Arc::clone(&store),
            Arc::clone(&trigger),
            Arc::clone(&clock),
        );
        Self {
            store,
            trigger,
            clock,
            engine,
        }
    }

    /// Rebuilds the engine from the persisted snapshot.
    pub fn restart(&mut self) {
        self.engine = TimerEngine::new(
            Arc::clone(&self.store),
            Arc::clone(&self.trigger),
            Arc::clone(&self.clock),
        );
    }
}

impl Default for TimerWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TimerWorld {
    TimerWorld::default()
}
