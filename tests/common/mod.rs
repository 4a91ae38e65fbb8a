//! Shared utilities for integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracer::{Channel, ChannelFactory, SourceLevel, TraceListener, TraceRecord, TraceResult};

/// Channel factory that counts how often each name is constructed.
#[derive(Clone, Default)]
pub struct CountingFactory {
    created: Arc<Mutex<HashMap<String, usize>>>,
    total: Arc<AtomicUsize>,
}

impl CountingFactory {
    pub fn count(&self, name: &str) -> usize {
        self.created.lock().unwrap().get(name).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

impl ChannelFactory for CountingFactory {
    fn create(&self, name: &str, level: SourceLevel) -> TraceResult<Channel> {
        *self.created.lock().unwrap().entry(name.to_string()).or_default() += 1;
        self.total.fetch_add(1, Ordering::SeqCst);
        Ok(Channel::new(name, level))
    }
}

/// Listener that appends `"<listener>@<channel>"` to a shared log on every record.
#[allow(dead_code)]
pub struct OrderListener {
    name: String,
    log: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl OrderListener {
    pub fn new(name: &str, log: &Arc<Mutex<Vec<String>>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            log: log.clone(),
        })
    }
}

impl TraceListener for OrderListener {
    fn name(&self) -> &str {
        &self.name
    }

    fn trace(&self, record: &TraceRecord) {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}@{}", self.name, record.source));
    }
}
