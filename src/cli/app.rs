//! Wiring of stores, services and adapters for one CLI invocation.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::config::AppConfig;
use crate::filter::services::FilterStore;
use crate::notify::{adapters::TracingDelivery, services::NotificationTrigger};
use crate::storage::adapters::DirectoryStore;
use crate::task::{
    adapters::JsonFileTaskSource,
    ports::{Credentials, TaskSourceError},
    services::TaskRegistry,
};
use crate::timer::services::{TimerEngine, TimerRuntime};

/// Overtime trigger used by the binary.
pub type CliTrigger = NotificationTrigger<TracingDelivery>;

/// Timer runtime used by the binary.
pub type CliTimers = TimerRuntime<DirectoryStore, CliTrigger, DefaultClock>;

/// Every service a command may need, backed by the configured data
/// directory.
pub struct App {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Fetched tasks in display order.
    pub registry: TaskRegistry<DirectoryStore>,
    /// Live filters, presets and sort.
    pub filters: FilterStore<DirectoryStore>,
    /// Timers with their periodic tick.
    pub timers: CliTimers,
    /// Overtime notification trigger shared with the timer engine.
    pub trigger: Arc<CliTrigger>,
    /// Task export reader.
    pub source: JsonFileTaskSource,
}

impl App {
    /// Opens the data directory and restores persisted state.
    ///
    /// # Errors
    ///
    /// Returns an error when the data directory cannot be created or opened.
    pub fn open(config: AppConfig) -> eyre::Result<Self> {
        let store = Arc::new(DirectoryStore::open(&config.data_dir)?);
        let trigger = Arc::new(NotificationTrigger::new(
            Arc::new(TracingDelivery),
            config.notifications,
        ));
        let engine = TimerEngine::new(
            Arc::clone(&store),
            Arc::clone(&trigger),
            Arc::new(DefaultClock),
        );
        let timers = TimerRuntime::new(engine, config.tick_interval());
        let source = JsonFileTaskSource::new(config.export_dir());
        Ok(Self {
            registry: TaskRegistry::new(Arc::clone(&store)),
            filters: FilterStore::new(store),
            timers,
            trigger,
            source,
            config,
        })
    }

    /// Returns the configured task source credentials.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        self.config.credentials()
    }

    /// Fetches tasks into the registry and teaches the trigger their titles.
    ///
    /// # Errors
    ///
    /// Returns the source's [`TaskSourceError`]; the registry records it as
    /// its failure state.
    pub async fn refresh_tasks(&mut self) -> Result<(), TaskSourceError> {
        let credentials = self.credentials();
        self.registry.refresh(&self.source, &credentials).await?;
        self.trigger.remember_titles(self.registry.tasks());
        Ok(())
    }
}
