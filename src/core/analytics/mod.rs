//! Link click tracking
//!
//! Sends opt-in usage events. Nothing leaves the machine unless tracking
//! is enabled in the settings.

use crate::config::Config;
use anyhow::{Context, Result};
use std::future::Future;
use std::time::Duration;

/// A single analytics event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub category: String,
    pub action: String,
    pub label: String,
}

impl Event {
    pub fn link_click(label: &str) -> Self {
        Self {
            category: "link".to_string(),
            action: "click".to_string(),
            label: label.to_string(),
        }
    }
}

/// Destination for analytics events
pub trait EventSink {
    fn send(&self, event: &Event) -> impl Future<Output = Result<()>> + Send;
}

/// Sink that only writes events to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    async fn send(&self, event: &Event) -> Result<()> {
        tracing::debug!(
            "event {}/{}: {}",
            event.category,
            event.action,
            event.label
        );
        Ok(())
    }
}

/// Sink posting events to a Measurement Protocol collection endpoint
#[derive(Debug, Clone)]
pub struct MeasurementProtocolSink {
    client: reqwest::Client,
    endpoint: String,
    tracking_id: String,
    client_id: String,
}

impl MeasurementProtocolSink {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        tracking_id: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            tracking_id: tracking_id.into(),
            client_id: client_id.into(),
        }
    }
}

impl EventSink for MeasurementProtocolSink {
    async fn send(&self, event: &Event) -> Result<()> {
        let params = [
            ("v", "1"),
            ("tid", self.tracking_id.as_str()),
            ("cid", self.client_id.as_str()),
            ("t", "event"),
            ("ec", event.category.as_str()),
            ("ea", event.action.as_str()),
            ("el", event.label.as_str()),
        ];

        let response = self
            .client
            .post(&self.endpoint)
            .form(&params)
            .send()
            .await
            .context("Failed to send analytics event")?;

        if !response.status().is_success() {
            anyhow::bail!("Analytics endpoint returned {}", response.status());
        }

        Ok(())
    }
}

/// Sink chosen from the configuration
#[derive(Debug, Clone)]
pub enum ConfiguredSink {
    Log(LogSink),
    Remote(MeasurementProtocolSink),
}

impl EventSink for ConfiguredSink {
    async fn send(&self, event: &Event) -> Result<()> {
        match self {
            Self::Log(sink) => sink.send(event).await,
            Self::Remote(sink) => sink.send(event).await,
        }
    }
}

/// Sends link events when tracking is enabled
#[derive(Debug, Clone)]
pub struct Tracker<S> {
    enabled: bool,
    sink: S,
}

impl<S: EventSink> Tracker<S> {
    pub fn new(enabled: bool, sink: S) -> Self {
        Self { enabled, sink }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Report a link click.
    ///
    /// Returns `true` if an event was sent. Disabled tracking or an empty
    /// label sends nothing.
    pub async fn track_link(&self, label: Option<&str>) -> Result<bool> {
        if !self.enabled {
            return Ok(false);
        }

        let Some(label) = label.filter(|l| !l.is_empty()) else {
            return Ok(false);
        };

        tracing::info!("{}", label);
        self.sink.send(&Event::link_click(label)).await?;
        Ok(true)
    }
}

impl Tracker<ConfiguredSink> {
    /// Build a tracker from settings; without a tracking id events are only logged
    pub fn from_config(config: &Config) -> Result<Self> {
        let analytics = &config.analytics;

        let sink = if analytics.tracking_id.is_empty() {
            ConfiguredSink::Log(LogSink)
        } else {
            let client = reqwest::Client::builder()
                .user_agent(config.network.user_agent.as_str())
                .timeout(Duration::from_secs(config.network.timeout_seconds))
                .build()?;
            ConfiguredSink::Remote(MeasurementProtocolSink::new(
                client,
                analytics.endpoint.as_str(),
                analytics.tracking_id.as_str(),
                analytics.client_id.as_str(),
            ))
        };

        Ok(Self::new(config.general.tracking, sink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct RecordingSink {
        events: Arc<Mutex<Vec<Event>>>,
    }

    impl EventSink for RecordingSink {
        async fn send(&self, event: &Event) -> Result<()> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_sends_when_enabled() {
        let sink = RecordingSink::default();
        let tracker = Tracker::new(true, sink.clone());

        assert!(tracker.track_link(Some("docs")).await.unwrap());

        let events = sink.events.lock().unwrap();
        assert_eq!(events.as_slice(), &[Event::link_click("docs")]);
    }

    #[tokio::test]
    async fn test_disabled_sends_nothing() {
        let sink = RecordingSink::default();
        let tracker = Tracker::new(false, sink.clone());

        assert!(!tracker.track_link(Some("docs")).await.unwrap());
        assert!(sink.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_label_sends_nothing() {
        let sink = RecordingSink::default();
        let tracker = Tracker::new(true, sink.clone());

        assert!(!tracker.track_link(None).await.unwrap());
        assert!(!tracker.track_link(Some("")).await.unwrap());
        assert!(sink.events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_from_config_picks_sink() {
        let mut config = Config::default();
        let tracker = Tracker::from_config(&config).unwrap();
        assert!(!tracker.is_enabled());
        assert!(matches!(tracker.sink, ConfiguredSink::Log(_)));

        config.general.tracking = true;
        config.analytics.tracking_id = "UA-1-1".to_string();
        let tracker = Tracker::from_config(&config).unwrap();
        assert!(tracker.is_enabled());
        assert!(matches!(tracker.sink, ConfiguredSink::Remote(_)));
    }
}
