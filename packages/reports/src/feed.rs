//! Snapshot fan-out for the live report feed.
//!
//! [`ReportFeed`] holds the most recent snapshot in a
//! [`tokio::sync::watch`] channel. Screens acquire a [`ReportSubscription`]
//! while they are shown; dropping it releases the subscription on every
//! exit path.

use std::cmp::Reverse;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use temis_reports_models::LiveReport;
use tokio::sync::watch;

use crate::FeedError;
use crate::normalize::normalize_document;

/// The latest state of the feed as seen by subscribers.
#[derive(Debug, Clone, Default)]
pub struct ReportSnapshot {
    /// Reports ordered by timestamp, newest first.
    pub reports: Arc<Vec<LiveReport>>,
    /// Last upstream failure since the previous good snapshot, if any.
    pub notice: Option<FeedError>,
    /// Incremented on every publish.
    pub revision: u64,
}

/// Publisher side of the live report feed.
pub struct ReportFeed {
    collection: String,
    tx: watch::Sender<ReportSnapshot>,
    subscribers: Arc<AtomicUsize>,
}

impl ReportFeed {
    /// Creates an empty feed for `collection`.
    #[must_use]
    pub fn new(collection: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(ReportSnapshot::default());
        Self {
            collection: collection.into(),
            tx,
            subscribers: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Normalizes a full collection snapshot and publishes it.
    ///
    /// Documents without usable coordinates are dropped. Returns the number
    /// of reports published.
    pub fn publish_documents<I>(&self, documents: I) -> usize
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        let mut dropped: usize = 0;
        let mut reports: Vec<LiveReport> = documents
            .into_iter()
            .filter_map(|(id, doc)| {
                let report = normalize_document(&id, &doc);
                if report.is_none() {
                    dropped += 1;
                }
                report
            })
            .collect();

        // Newest first; reports without a timestamp sort last.
        reports.sort_by_key(|r| Reverse(r.timestamp));

        if dropped > 0 {
            log::debug!(
                "[{}] Dropped {dropped} reports without coordinates",
                self.collection
            );
        }

        let count = reports.len();
        let revision = self.tx.borrow().revision + 1;
        self.tx.send_replace(ReportSnapshot {
            reports: Arc::new(reports),
            notice: None,
            revision,
        });

        log::debug!("[{}] Published {count} reports (revision {revision})", self.collection);
        count
    }

    /// Records an upstream failure. The last good reports stay in place.
    pub fn publish_error(&self, error: FeedError) {
        log::error!("[{}] Error syncing citizen reports: {error}", self.collection);
        self.tx.send_modify(|snapshot| {
            snapshot.notice = Some(error);
            snapshot.revision += 1;
        });
    }

    /// Acquires a subscription. It is released when dropped.
    #[must_use]
    pub fn subscribe(&self) -> ReportSubscription {
        let active = self.subscribers.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("[{}] Subscribed ({active} active)", self.collection);
        ReportSubscription {
            collection: self.collection.clone(),
            rx: self.tx.subscribe(),
            subscribers: Arc::clone(&self.subscribers),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.load(Ordering::SeqCst)
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ReportSnapshot {
        self.tx.borrow().clone()
    }
}

/// A scoped subscription to a [`ReportFeed`].
pub struct ReportSubscription {
    collection: String,
    rx: watch::Receiver<ReportSnapshot>,
    subscribers: Arc<AtomicUsize>,
}

impl ReportSubscription {
    /// The snapshot current at the time of the call.
    #[must_use]
    pub fn current(&self) -> ReportSnapshot {
        self.rx.borrow().clone()
    }

    /// Waits for the next published snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Closed`] once the feed has been dropped.
    pub async fn changed(&mut self) -> Result<ReportSnapshot, FeedError> {
        self.rx.changed().await.map_err(|_| FeedError::Closed)?;
        Ok(self.rx.borrow_and_update().clone())
    }
}

impl Drop for ReportSubscription {
    fn drop(&mut self) {
        let remaining = self.subscribers.fetch_sub(1, Ordering::SeqCst) - 1;
        log::debug!(
            "[{}] Unsubscribed ({remaining} active)",
            self.collection
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::REPORT_COLLECTION;
    use serde_json::json;

    fn doc(title: &str, timestamp: &str) -> serde_json::Value {
        json!({
            "title": title,
            "category": "Seguridad",
            "coordinates": { "latitude": 20.67, "longitude": -103.34 },
            "status": "Pendiente",
            "timestamp": timestamp,
        })
    }

    #[test]
    fn publishes_newest_first_and_drops_unplaceable() {
        let feed = ReportFeed::new(REPORT_COLLECTION);
        let published = feed.publish_documents(vec![
            ("a".to_string(), doc("viejo", "2025-01-01T00:00:00Z")),
            ("b".to_string(), json!({ "title": "sin coordenadas" })),
            ("c".to_string(), doc("nuevo", "2025-02-01T00:00:00Z")),
        ]);

        assert_eq!(published, 2);
        let snapshot = feed.snapshot();
        assert_eq!(snapshot.revision, 1);
        let ids: Vec<&str> = snapshot.reports.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn error_keeps_last_good_reports() {
        let feed = ReportFeed::new(REPORT_COLLECTION);
        feed.publish_documents(vec![("a".to_string(), doc("x", "2025-01-01T00:00:00Z"))]);
        feed.publish_error(FeedError::Upstream {
            message: "permission denied".to_string(),
        });

        let snapshot = feed.snapshot();
        assert_eq!(snapshot.reports.len(), 1);
        assert!(matches!(snapshot.notice, Some(FeedError::Upstream { .. })));

        feed.publish_documents(Vec::new());
        assert!(feed.snapshot().notice.is_none());
    }

    #[test]
    fn dropping_subscription_releases_it() {
        let feed = ReportFeed::new(REPORT_COLLECTION);
        let first = feed.subscribe();
        {
            let _second = feed.subscribe();
            assert_eq!(feed.subscriber_count(), 2);
        }
        assert_eq!(feed.subscriber_count(), 1);
        drop(first);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn subscriber_sees_new_snapshots() {
        let feed = ReportFeed::new(REPORT_COLLECTION);
        let mut sub = feed.subscribe();
        assert!(sub.current().reports.is_empty());

        feed.publish_documents(vec![("a".to_string(), doc("x", "2025-01-01T00:00:00Z"))]);

        let snapshot = sub.changed().await.unwrap();
        assert_eq!(snapshot.reports.len(), 1);
        assert_eq!(snapshot.revision, 1);
    }

    #[tokio::test]
    async fn closed_feed_ends_subscription() {
        let feed = ReportFeed::new(REPORT_COLLECTION);
        let mut sub = feed.subscribe();
        drop(feed);
        assert_eq!(sub.changed().await.unwrap_err(), FeedError::Closed);
    }
}
