use crate::clients::common::ClientTrait;
use crate::schema::notification::NotificationSnapshot;
use crate::Result;

use std::cell::RefCell;
use std::rc::Rc;

type ClientRef = Rc<RefCell<dyn ClientTrait>>;
pub struct Client(ClientRef);

impl Client {
    pub fn new(client: impl ClientTrait + 'static) -> Self {
        Client(Rc::new(RefCell::new(client)))
    }

    pub fn get_notifications(&self) -> Result<NotificationSnapshot> {
        self.0.borrow_mut().get_notifications()
    }

    pub fn mark_read(&self, id: &str) -> Result<()> {
        self.0.borrow_mut().mark_read(id)
    }

    pub fn mark_all_read(&self) -> Result<()> {
        self.0.borrow_mut().mark_all_read()
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.0.borrow_mut().delete(id)
    }

    pub fn delete_all(&self) -> Result<()> {
        self.0.borrow_mut().delete_all()
    }
}

impl Clone for Client {
    fn clone(&self) -> Self {
        Client(self.0.clone())
    }
}
