use crate::framework::application::Context;
use crate::Result;

pub trait WorkerTrait {
    fn name(&self) -> &str;
    fn initialize(&mut self, ctx: Context) -> Result<()>;
    fn do_work(&mut self, ctx: Context) -> Result<()>;
    fn deinitialize(&mut self, ctx: Context) -> Result<()>;
    fn process_events(&mut self, ctx: Context) -> Result<()>;
}
