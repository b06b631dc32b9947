use crate::clients::common::ClientTrait;
use crate::config::Config;
use crate::error::Error;
use crate::schema::notification::NotificationSnapshot;
use crate::Result;

use std::time::Duration;

pub struct Client {
    api_url: String,
    token: Option<String>,
    agent: ureq::Agent,
}

impl Client {
    pub fn new(url: &str) -> Client {
        Client::from_config(&Config::new(url))
    }

    pub fn from_config(config: &Config) -> Client {
        Client {
            api_url: config.api_url(),
            token: config.token.clone(),
            agent: ureq::AgentBuilder::new()
                .timeout(config.request_timeout)
                .build(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Client {
        self.agent = ureq::AgentBuilder::new().timeout(timeout).build();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn item_url(&self, id: &str, suffix: &str) -> Result<String> {
        if id.is_empty() {
            return Err(Error::from_client("Notification id must not be empty"));
        }
        Ok(self.url(&format!(
            "/notifications/{}{}",
            urlencoding::encode(id),
            suffix
        )))
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        let request = self
            .agent
            .request(method, url)
            .set("Accept", "application/json");

        match &self.token {
            Some(token) => request.set("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    fn send(&self, method: &str, url: &str) -> Result<ureq::Response> {
        Ok(self.request(method, url).call()?)
    }
}

impl ClientTrait for Client {
    fn get_notifications(&mut self) -> Result<NotificationSnapshot> {
        let body = self
            .send("GET", &self.url("/notifications"))?
            .into_string()?;

        Ok(serde_json::from_str(&body)?)
    }

    fn mark_read(&mut self, id: &str) -> Result<()> {
        self.send("PUT", &self.item_url(id, "/read")?)?;
        Ok(())
    }

    fn mark_all_read(&mut self) -> Result<()> {
        self.send("PUT", &self.url("/notifications/read-all"))?;
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.send("DELETE", &self.item_url(id, "")?)?;
        Ok(())
    }

    fn delete_all(&mut self) -> Result<()> {
        self.send("DELETE", &self.url("/notifications/delete-all"))?;
        Ok(())
    }
}
