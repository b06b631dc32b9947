use crate::schema::notification::NotificationSnapshot;
use crate::Result;

/// The notification endpoints of the REST API.
pub trait ClientTrait {
    fn get_notifications(&mut self) -> Result<NotificationSnapshot>;
    fn mark_read(&mut self, id: &str) -> Result<()>;
    fn mark_all_read(&mut self) -> Result<()>;
    fn delete(&mut self, id: &str) -> Result<()>;
    fn delete_all(&mut self) -> Result<()>;
}
