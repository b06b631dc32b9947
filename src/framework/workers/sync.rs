use crate::framework::application::Context;
use crate::framework::logger::context;
use crate::framework::workers::common::WorkerTrait;
use crate::Result;

/// Sends owed server confirmations, then applies queued ingestion events.
pub struct Worker;

impl Worker {
    pub fn new() -> Self {
        Worker
    }
}

impl Default for Worker {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkerTrait for Worker {
    fn name(&self) -> &str {
        "sync"
    }

    fn initialize(&mut self, ctx: Context) -> Result<()> {
        ctx.logger().info(&format!(
            "[{}] Initializing sync worker",
            context("SyncWorker", "initialize")
        ));
        Ok(())
    }

    fn do_work(&mut self, ctx: Context) -> Result<()> {
        let store = ctx.store();
        let confirmations = store.process_confirmations();
        let events = store.process_events();

        if events > 0 || confirmations > 0 {
            ctx.logger().debug(&format!(
                "[{}] Applied {} events, sent {} confirmations",
                context("SyncWorker", "do_work"),
                events,
                confirmations
            ));
        }
        Ok(())
    }

    fn deinitialize(&mut self, ctx: Context) -> Result<()> {
        ctx.logger().info(&format!(
            "[{}] Clearing notification state for session end",
            context("SyncWorker", "deinitialize")
        ));
        ctx.store().clear();
        Ok(())
    }

    fn process_events(&mut self, _ctx: Context) -> Result<()> {
        Ok(())
    }
}
