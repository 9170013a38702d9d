use crate::catalog::CatalogEngine;
use crate::runtime::EventKind;
use crate::watcher::backoff::{BackoffOptions, ReconnectBackoff};
use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Keeps the catalog in sync with the runtime until cancelled.
///
/// Three loops share one scan trigger: the scan worker, a periodic ticker and
/// the event listener. Triggers that arrive while a scan is running collapse
/// into a single follow-up scan.
pub struct RuntimeWatcher {
    engine: Arc<CatalogEngine>,
    poll_interval: Duration,
    backoff: BackoffOptions,
    trigger: Arc<Notify>,
}

impl RuntimeWatcher {
    pub fn new(engine: Arc<CatalogEngine>, poll_interval: Duration, backoff: BackoffOptions) -> Self {
        Self {
            engine,
            poll_interval,
            backoff,
            trigger: Arc::new(Notify::new()),
        }
    }

    pub async fn run(self, cancellation_token: CancellationToken) {
        info!(
            "Watching containers, reconciling every {:?}",
            self.poll_interval
        );
        tokio::join!(
            scan_worker(
                self.engine.clone(),
                self.trigger.clone(),
                cancellation_token.clone()
            ),
            periodic_reconciliation(
                self.poll_interval,
                self.trigger.clone(),
                cancellation_token.clone()
            ),
            listen_for_events(
                self.engine.clone(),
                self.backoff,
                self.trigger.clone(),
                cancellation_token.clone()
            ),
        );
        info!("Container watcher stopped");
    }
}

async fn scan_worker(
    engine: Arc<CatalogEngine>,
    trigger: Arc<Notify>,
    cancellation_token: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancellation_token.cancelled() => {
                debug!("Scan worker cancelled");
                break;
            }
            _ = trigger.notified() => {
                tokio::select! {
                    _ = cancellation_token.cancelled() => {
                        debug!("Scan worker cancelled mid-scan");
                        break;
                    }
                    // failures are logged by the engine
                    result = engine.full_scan() => {
                        if let Ok(report) = result {
                            trace!("Scan finished: {:?}", report);
                        }
                    }
                }
            }
        }
    }
}

async fn periodic_reconciliation(
    poll_interval: Duration,
    trigger: Arc<Notify>,
    cancellation_token: CancellationToken,
) {
    // the first tick completes immediately and produces the startup scan
    let mut interval = tokio::time::interval(poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = cancellation_token.cancelled() => {
                debug!("Periodic reconciliation cancelled");
                break;
            }
            _ = interval.tick() => {
                trace!("Periodic reconciliation tick");
                trigger.notify_one();
            }
        }
    }
}

async fn listen_for_events(
    engine: Arc<CatalogEngine>,
    backoff_options: BackoffOptions,
    trigger: Arc<Notify>,
    cancellation_token: CancellationToken,
) {
    let mut backoff = ReconnectBackoff::new(backoff_options);
    loop {
        match engine.runtime().subscribe_events(&EventKind::WATCHED).await {
            Ok(mut events) => {
                info!("Subscribed to container events");
                backoff.reset();
                // catch up on anything missed while disconnected
                trigger.notify_one();
                loop {
                    tokio::select! {
                        _ = cancellation_token.cancelled() => {
                            debug!("Event listener cancelled");
                            return;
                        }
                        next = events.next() => match next {
                            Some(Ok(event)) => {
                                debug!("Container {} {}", event.container_id, event.kind);
                                trigger.notify_one();
                            }
                            Some(Err(e)) => {
                                warn!("Container event stream failed: {:#}", e);
                                break;
                            }
                            None => {
                                warn!("Container event stream ended");
                                break;
                            }
                        }
                    }
                }
                // dropping the stream closes the subscription
                drop(events);
                engine.mark_disconnected();
            }
            Err(e) => {
                warn!("Failed to subscribe to container events: {:#}", e);
                engine.mark_disconnected();
            }
        }

        let delay = backoff.next_delay();
        info!("Reconnecting to container events in {:?}", delay);
        tokio::select! {
            _ = cancellation_token.cancelled() => {
                debug!("Event listener cancelled while waiting to reconnect");
                return;
            }
            _ = tokio::time::sleep(delay) => {}
        }
    }
}
