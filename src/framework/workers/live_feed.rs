use crate::clients::websocket::{FeedStatus, LiveFeed};
use crate::config::Config;
use crate::framework::application::Context;
use crate::framework::logger::context;
use crate::framework::workers::common::WorkerTrait;
use crate::Result;

/// Owns the socket connection for the lifetime of the session.
pub struct Worker {
    feed: LiveFeed,
}

impl Worker {
    pub fn new(config: &Config) -> Self {
        Worker {
            feed: LiveFeed::new(config),
        }
    }

    pub fn connected(&self) -> bool {
        self.feed.connected()
    }
}

impl WorkerTrait for Worker {
    fn name(&self) -> &str {
        "live_feed"
    }

    fn initialize(&mut self, ctx: Context) -> Result<()> {
        let c = context("LiveFeedWorker", "initialize");

        if self.feed.connect(ctx.store().event_sender()) {
            ctx.logger()
                .info(&format!("[{}] Connecting to the live feed", c));
        } else {
            ctx.logger().info(&format!(
                "[{}] No session token, live feed disabled",
                c
            ));
        }
        Ok(())
    }

    fn do_work(&mut self, _ctx: Context) -> Result<()> {
        Ok(())
    }

    fn deinitialize(&mut self, ctx: Context) -> Result<()> {
        if self.feed.disconnect() {
            ctx.logger().info(&format!(
                "[{}] Disconnected from the live feed",
                context("LiveFeedWorker", "deinitialize")
            ));
        }
        Ok(())
    }

    fn process_events(&mut self, ctx: Context) -> Result<()> {
        let c = context("LiveFeedWorker", "process_events");

        for status in self.feed.statuses() {
            match status {
                FeedStatus::Connected => {
                    ctx.logger().info(&format!("[{}] Live feed connected", c));
                }
                FeedStatus::Disconnected { reason, retry_in } => {
                    ctx.logger().warning(&format!(
                        "[{}] Live feed lost ({}), reconnecting in {} ms",
                        c,
                        reason,
                        retry_in.as_millis()
                    ));
                }
                FeedStatus::DroppedFrame(e) => {
                    ctx.logger()
                        .warning(&format!("[{}] Failed to parse message: {}", c, e));
                }
                FeedStatus::Stopped => {
                    ctx.logger().debug(&format!("[{}] Live feed stopped", c));
                }
            }
        }
        Ok(())
    }
}
