//! A `tracing` layer that batches selected events and ingests them into Quickwit.
//!
//! Events are routed by the string value of a marker field (`task = "..."`):
//! each known value maps to a Quickwit index, anything else is ignored.

use crate::logging::consts::{QUICKWIT_FLUSH_INTERVAL, QUICKWIT_LOGGING_CHANNEL_CAPACITY};
use reqwest::Client;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::field::{Field, Visit};
use tracing_core::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;
use url::Url;

type LogRecord = Map<String, Value>;

pub struct QuickwitLayerBuilder {
    quickwit_url: Url,
    marker_field: String,
    routes: HashMap<String, String>,
    batch_size: usize,
    flush_interval: Duration,
}

impl QuickwitLayerBuilder {
    pub fn new(quickwit_url: Url) -> Self {
        Self {
            quickwit_url,
            marker_field: String::from("task"),
            routes: HashMap::new(),
            batch_size: 1,
            flush_interval: QUICKWIT_FLUSH_INTERVAL,
        }
    }

    pub fn marker_field(mut self, field: &str) -> Self {
        self.marker_field = field.to_string();
        self
    }

    pub fn route(mut self, marker_value: &str, index_id: &str) -> Self {
        self.routes
            .insert(marker_value.to_string(), index_id.to_string());
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Partial batches are shipped at least this often.
    pub fn flush_interval(mut self, flush_interval: Duration) -> Self {
        self.flush_interval = flush_interval.max(Duration::from_millis(1));
        self
    }

    /// Spawns the shipping task, so this has to be called from within a tokio runtime.
    pub fn build(self) -> QuickwitLayer {
        let (sender, receiver) = mpsc::channel(QUICKWIT_LOGGING_CHANNEL_CAPACITY);
        tokio::spawn(ship_batches(
            self.quickwit_url,
            receiver,
            self.batch_size,
            self.flush_interval,
        ));
        QuickwitLayer {
            sender,
            marker_field: self.marker_field,
            routes: self.routes,
        }
    }
}

pub struct QuickwitLayer {
    sender: mpsc::Sender<IndexedRecord>,
    marker_field: String,
    routes: HashMap<String, String>,
}

impl QuickwitLayer {
    fn index_for(&self, event: &Event<'_>) -> Option<String> {
        let mut visitor = MarkerVisitor {
            marker_field: &self.marker_field,
            marker_value: None,
        };
        event.record(&mut visitor);
        visitor
            .marker_value
            .and_then(|value| self.routes.get(&value).cloned())
    }
}

impl<S: Subscriber> Layer<S> for QuickwitLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let Some(index_id) = self.index_for(event) else {
            return;
        };
        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);
        visitor
            .record
            .insert(String::from("level"), event.metadata().level().as_str().into());
        // Dropping records under back-pressure beats blocking request handlers.
        let _ = self.sender.try_send(IndexedRecord {
            index_id,
            record: visitor.record,
        });
    }
}

struct IndexedRecord {
    index_id: String,
    record: LogRecord,
}

async fn ship_batches(
    quickwit_url: Url,
    mut receiver: mpsc::Receiver<IndexedRecord>,
    batch_size: usize,
    flush_interval: Duration,
) {
    let http_client = Client::new();
    let mut buffers: HashMap<String, Vec<LogRecord>> = HashMap::new();
    let mut flush_timer =
        tokio::time::interval_at(Instant::now() + flush_interval, flush_interval);
    flush_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            received = receiver.recv() => {
                let Some(IndexedRecord { index_id, record }) = received else {
                    break;
                };
                let buffer = buffers.entry(index_id.clone()).or_default();
                buffer.push(record);
                if buffer.len() >= batch_size {
                    ingest(&http_client, &quickwit_url, &index_id, buffer).await;
                }
            }
            _ = flush_timer.tick() => {
                flush_all(&http_client, &quickwit_url, &mut buffers).await;
            }
        }
    }
    flush_all(&http_client, &quickwit_url, &mut buffers).await;
}

async fn flush_all(
    http_client: &Client,
    quickwit_url: &Url,
    buffers: &mut HashMap<String, Vec<LogRecord>>,
) {
    for (index_id, buffer) in buffers.iter_mut() {
        ingest(http_client, quickwit_url, index_id, buffer).await;
    }
}

/// Sends and clears the buffer. Failures are reported to stderr only, since
/// logging them through `tracing` would feed back into this layer.
async fn ingest(http_client: &Client, quickwit_url: &Url, index_id: &str, buffer: &mut Vec<LogRecord>) {
    if buffer.is_empty() {
        return;
    }
    let body = to_ndjson(buffer);
    buffer.clear();
    let ingest_url = match quickwit_url.join(&format!("api/v1/{index_id}/ingest")) {
        Ok(url) => url,
        Err(err) => {
            eprintln!("Invalid Quickwit ingest URL for `{index_id}`: {err}");
            return;
        }
    };
    if let Err(err) = http_client.post(ingest_url).body(body).send().await {
        eprintln!("Failed to ship logs to Quickwit index `{index_id}`: {err}");
    }
}

pub fn to_ndjson(records: &[LogRecord]) -> String {
    let mut ndjson = String::new();
    for record in records {
        ndjson.push_str(&Value::Object(record.clone()).to_string());
        ndjson.push('\n');
    }
    ndjson
}

struct MarkerVisitor<'a> {
    marker_field: &'a str,
    marker_value: Option<String>,
}

impl Visit for MarkerVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == self.marker_field {
            self.marker_value = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn fmt::Debug) {}
}

#[derive(Default)]
struct RecordVisitor {
    record: LogRecord,
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record.insert(field.name().to_string(), value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record.insert(field.name().to_string(), value.into());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record.insert(field.name().to_string(), value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record.insert(field.name().to_string(), value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record.insert(field.name().to_string(), value.into());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record
            .insert(field.name().to_string(), format!("{value:?}").into());
    }
}
