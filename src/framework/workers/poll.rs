use crate::framework::application::Context;
use crate::framework::logger::context;
use crate::framework::workers::common::WorkerTrait;
use crate::Result;

use std::time::{Duration, Instant};

/// Refreshes the store on a fixed interval. The first tick polls immediately.
pub struct Worker {
    interval: Duration,
    last_poll: Option<Instant>,
}

impl Worker {
    pub fn new(interval: Duration) -> Self {
        Worker {
            interval,
            last_poll: None,
        }
    }

    fn due(&self, now: Instant) -> bool {
        match self.last_poll {
            Some(last) => now.duration_since(last) >= self.interval,
            None => true,
        }
    }
}

impl WorkerTrait for Worker {
    fn name(&self) -> &str {
        "poll"
    }

    fn initialize(&mut self, ctx: Context) -> Result<()> {
        ctx.logger().info(&format!(
            "[{}] Polling every {} s",
            context("PollWorker", "initialize"),
            self.interval.as_secs()
        ));
        self.last_poll = None;
        Ok(())
    }

    fn do_work(&mut self, ctx: Context) -> Result<()> {
        let now = Instant::now();
        if !self.due(now) {
            return Ok(());
        }

        self.last_poll = Some(now);
        ctx.store().poll();
        Ok(())
    }

    fn deinitialize(&mut self, _ctx: Context) -> Result<()> {
        self.last_poll = None;
        Ok(())
    }

    fn process_events(&mut self, _ctx: Context) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_immediately_then_after_interval() {
        let mut worker = Worker::new(Duration::from_secs(15));
        let start = Instant::now();
        assert!(worker.due(start));

        worker.last_poll = Some(start);
        assert!(!worker.due(start + Duration::from_secs(14)));
        assert!(worker.due(start + Duration::from_secs(15)));
    }
}
