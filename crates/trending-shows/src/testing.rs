//! Scripted show source for tests

use crate::resolver::ShowSource;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use streaming_availability::{Show, StreamingError, Timeframe};

pub struct ScriptedSource {
    shows: Vec<Show>,
    failure: Option<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, Timeframe)>>,
}

impl ScriptedSource {
    pub fn new(shows: Vec<Show>) -> Self {
        Self {
            shows,
            failure: None,
            delay: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A source whose every fetch fails with an API error
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(Vec::new())
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<(String, Timeframe)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ShowSource for ScriptedSource {
    async fn fetch_shows(
        &self,
        platform: &str,
        timeframe: Timeframe,
    ) -> Result<Vec<Show>, StreamingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap()
            .push((platform.to_string(), timeframe));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.failure {
            Some(message) => Err(StreamingError::Api(message.clone())),
            None => Ok(self.shows.clone()),
        }
    }
}
