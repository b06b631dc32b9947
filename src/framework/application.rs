use crate::framework::logger::{context, Logger};
use crate::framework::store::NotificationStore;
use crate::framework::workers::common::WorkerTrait;
use crate::Result;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub trait ApplicationTrait {
    fn execute(&mut self) -> Result<()>;
    fn add_worker(&mut self, worker: Box<dyn WorkerTrait>);
}

/// Can be raised from any thread, e.g. a signal handler or a logout hook.
pub struct BoolFlag(Arc<AtomicBool>);

impl BoolFlag {
    pub fn new() -> Self {
        BoolFlag(Arc::new(AtomicBool::new(false)))
    }

    pub fn set(&self, value: bool) {
        self.0.store(value, Ordering::SeqCst);
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for BoolFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for BoolFlag {
    fn clone(&self) -> Self {
        BoolFlag(self.0.clone())
    }
}

struct _Context {
    pub store: NotificationStore,
    pub logger: Logger,
    pub quit: BoolFlag,
}

type ContextRef = Rc<RefCell<_Context>>;
pub struct Context(ContextRef);

impl Context {
    pub fn new(store: NotificationStore, logger: Logger) -> Self {
        Context(Rc::new(RefCell::new(_Context {
            store,
            logger,
            quit: BoolFlag::new(),
        })))
    }

    pub fn store(&self) -> NotificationStore {
        self.0.borrow().store.clone()
    }

    pub fn logger(&self) -> Logger {
        self.0.borrow().logger.clone()
    }

    pub fn quit(&self) -> BoolFlag {
        self.0.borrow().quit.clone()
    }
}

impl Clone for Context {
    fn clone(&self) -> Self {
        Context(self.0.clone())
    }
}

/// Drives the workers on one thread: initialize once, tick until the quit flag
/// is raised, then deinitialize (session teardown).
pub struct Application {
    ctx: Context,
    workers: Vec<Box<dyn WorkerTrait>>,
    loop_interval: Duration,
}

impl Application {
    pub fn new(ctx: Context, loop_interval: Duration) -> Self {
        Self {
            ctx,
            workers: vec![],
            loop_interval,
        }
    }

    pub fn context(&self) -> Context {
        self.ctx.clone()
    }

    pub fn initialize(&mut self) -> Result<()> {
        let c = context("Application", "initialize");
        let ctx = self.ctx.clone();

        ctx.logger().info(&format!("[{}] Initializing application", c));
        for worker in &mut self.workers {
            if let Err(e) = worker.initialize(ctx.clone()) {
                ctx.logger().error(&format!(
                    "[{}] Error while initializing worker '{}': {}",
                    c,
                    worker.name(),
                    e
                ));
            }
        }

        Ok(())
    }

    /// One pass over every worker followed by event processing.
    pub fn tick(&mut self) {
        let c = context("Application", "tick");
        let ctx = self.ctx.clone();

        for worker in &mut self.workers {
            let start = Instant::now();

            if let Err(e) = worker.do_work(ctx.clone()) {
                ctx.logger().error(&format!(
                    "[{}] Error while executing worker '{}': {}",
                    c,
                    worker.name(),
                    e
                ));
            }

            ctx.logger().trace(&format!(
                "[{}] Worker '{}' took {} ms to complete tick",
                c,
                worker.name(),
                start.elapsed().as_millis()
            ));
        }

        for worker in &mut self.workers {
            if let Err(e) = worker.process_events(ctx.clone()) {
                ctx.logger().error(&format!(
                    "[{}] Error while processing events of worker '{}': {}",
                    c,
                    worker.name(),
                    e
                ));
            }
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let c = context("Application", "run");
        let ctx = self.ctx.clone();

        ctx.logger().info(&format!("[{}] Application has started", c));

        while !ctx.quit().get() {
            let start = Instant::now();
            self.tick();

            if !ctx.quit().get() {
                let elapsed = start.elapsed();
                if self.loop_interval > elapsed {
                    let idle = self.loop_interval - elapsed;
                    ctx.logger()
                        .trace(&format!("[{}] Idle for {} ms", c, idle.as_millis()));
                    std::thread::sleep(idle);
                }
            }
        }

        Ok(())
    }

    pub fn deinitialize(&mut self) -> Result<()> {
        let c = context("Application", "deinitialize");
        let ctx = self.ctx.clone();

        ctx.logger().info(&format!("[{}] Deinitializing application", c));
        for worker in &mut self.workers {
            if let Err(e) = worker.deinitialize(ctx.clone()) {
                ctx.logger().error(&format!(
                    "[{}] Error while deinitializing worker '{}': {}",
                    c,
                    worker.name(),
                    e
                ));
            }
        }

        ctx.logger().info(&format!("[{}] Shutting down now", c));
        Ok(())
    }
}

impl ApplicationTrait for Application {
    fn execute(&mut self) -> Result<()> {
        self.initialize()?;
        self.run()?;
        self.deinitialize()
    }

    fn add_worker(&mut self, worker: Box<dyn WorkerTrait>) {
        self.workers.push(worker);
    }
}
