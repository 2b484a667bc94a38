//! Background work: request dispatch and periodic polling.
//!
//! The controller never awaits the network. It hands out [`Request`]s, the
//! [`Dispatcher`] runs each one on its own task, and results come back as
//! [`AppEvent`]s on an unbounded channel drained by the event loop.

use crate::tiles::{ApiError, Tile, TileApi, TileId};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// Network work requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Fetch the whole collection
    ListAll,
    /// Create a tile from the draft
    Create(Tile),
    /// Replace the tile stored under the id
    Update(TileId, Tile),
    /// Delete the tile stored under the id
    Delete(TileId),
}

/// Which write an [`AppEvent::WriteFinished`] reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Create,
    Update(TileId),
    Delete(TileId),
}

impl fmt::Display for WriteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOp::Create => f.write_str("create tile"),
            WriteOp::Update(id) => write!(f, "update tile {}", id),
            WriteOp::Delete(id) => write!(f, "delete tile {}", id),
        }
    }
}

/// Something the event loop must feed into the controller.
#[derive(Debug)]
pub enum AppEvent {
    /// The poll timer fired
    PollTick,
    /// A listing request completed
    TilesLoaded(Result<Value, ApiError>),
    /// A write request completed
    WriteFinished(WriteOp, Result<(), ApiError>),
}

/// Runs requests against a [`TileApi`] without blocking the caller.
pub struct Dispatcher<A: ?Sized> {
    api: Arc<A>,
    events: UnboundedSender<AppEvent>,
}

impl<A: TileApi + ?Sized + 'static> Dispatcher<A> {
    /// Create a dispatcher reporting to `events`.
    pub fn new(api: Arc<A>, events: UnboundedSender<AppEvent>) -> Self {
        Self { api, events }
    }

    /// Spawn a task executing `request`.
    ///
    /// # Returns
    /// * `JoinHandle<()>` - Handle of the spawned task; dropping it detaches the task
    ///
    /// # Details
    /// Overlapping requests are neither deduplicated nor ordered: two
    /// listings in flight each deliver their own [`AppEvent::TilesLoaded`],
    /// and whichever arrives last is what the controller keeps.
    pub fn dispatch(&self, request: Request) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = execute(api.as_ref(), request).await;
            // A closed channel means the UI is gone; nothing left to notify.
            let _ = events.send(event);
        })
    }
}

async fn execute<A: TileApi + ?Sized>(api: &A, request: Request) -> AppEvent {
    match request {
        Request::ListAll => AppEvent::TilesLoaded(api.list_all().await),
        Request::Create(tile) => AppEvent::WriteFinished(WriteOp::Create, api.create(&tile).await),
        Request::Update(id, tile) => {
            let result = api.update(&id, &tile).await;
            AppEvent::WriteFinished(WriteOp::Update(id), result)
        }
        Request::Delete(id) => {
            let result = api.delete(&id).await;
            AppEvent::WriteFinished(WriteOp::Delete(id), result)
        }
    }
}

/// Periodic refresh timer bound to the lifetime of this value.
///
/// The first tick fires immediately, so starting the poller also performs
/// the initial load. Ticks run on the runtime's monotonic clock. Dropping the
/// poller aborts the timer task.
#[derive(Debug)]
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    /// Start sending [`AppEvent::PollTick`] every `period`.
    pub fn start(period: Duration, events: UnboundedSender<AppEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if events.send(AppEvent::PollTick).is_err() {
                    tracing::debug!("event channel closed, stopping poller");
                    break;
                }
            }
        });
        tracing::info!(period_secs = period.as_secs_f64(), "poller started");
        Self { handle }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::info!("poller stopped");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    impl Poller {
        fn is_running(&self) -> bool {
            !self.handle.is_finished()
        }
    }

    /// In-memory backend recording every call in order.
    #[derive(Default)]
    pub(crate) struct RecordingApi {
        pub calls: Mutex<Vec<String>>,
        pub stored: Mutex<Vec<Tile>>,
        pub fail_writes: bool,
    }

    impl RecordingApi {
        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn write_result(&self) -> Result<(), ApiError> {
            if self.fail_writes {
                Err(ApiError::Server {
                    status: 500,
                    body: "boom".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl TileApi for RecordingApi {
        async fn list_all(&self) -> Result<Value, ApiError> {
            self.record("list".to_string());
            let stored = self.stored.lock().unwrap().clone();
            Ok(json!({ "data": stored }))
        }

        async fn create(&self, tile: &Tile) -> Result<(), ApiError> {
            self.record(format!("create {}", serde_json::to_string(&tile.as_new())?));
            self.write_result()?;
            let mut stored = self.stored.lock().unwrap();
            let id = TileId::from(stored.len() as i64 + 1);
            stored.push(tile.clone().with_id(id));
            Ok(())
        }

        async fn update(&self, id: &TileId, tile: &Tile) -> Result<(), ApiError> {
            self.record(format!("update {}", id));
            self.write_result()?;
            let mut stored = self.stored.lock().unwrap();
            if let Some(slot) = stored.iter_mut().find(|t| t.id.as_ref() == Some(id)) {
                *slot = tile.clone();
            }
            Ok(())
        }

        async fn delete(&self, id: &TileId) -> Result<(), ApiError> {
            self.record(format!("delete {}", id));
            self.write_result()?;
            self.stored
                .lock()
                .unwrap()
                .retain(|t| t.id.as_ref() != Some(id));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_dispatch_list_reports_tiles_loaded() {
        let api = Arc::new(RecordingApi::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(Arc::clone(&api), tx);

        dispatcher.dispatch(Request::ListAll).await.unwrap();

        match rx.recv().await {
            Some(AppEvent::TilesLoaded(Ok(body))) => assert_eq!(body, json!({"data": []})),
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(api.calls(), ["list"]);
    }

    #[tokio::test]
    async fn test_dispatch_write_reports_operation() {
        let api = Arc::new(RecordingApi {
            fail_writes: true,
            ..RecordingApi::default()
        });
        let (tx, mut rx) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher::new(Arc::clone(&api), tx);

        dispatcher
            .dispatch(Request::Delete(TileId::from(4)))
            .await
            .unwrap();

        match rx.recv().await {
            Some(AppEvent::WriteFinished(WriteOp::Delete(id), Err(ApiError::Server { status, .. }))) => {
                assert_eq!(id, TileId::from(4));
                assert_eq!(status, 500);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dispatch_with_closed_channel_does_not_panic() {
        let api = Arc::new(RecordingApi::default());
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let dispatcher = Dispatcher::new(api, tx);
        assert!(dispatcher.dispatch(Request::ListAll).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_ticks_immediately_then_every_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let poller = Poller::start(Duration::from_secs(3), tx);

        assert!(matches!(rx.recv().await, Some(AppEvent::PollTick)));
        let after_first = Instant::now();

        assert!(matches!(rx.recv().await, Some(AppEvent::PollTick)));
        assert!(after_first.elapsed() >= Duration::from_secs(3));
        assert!(poller.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_poller_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let poller = Poller::start(Duration::from_secs(3), tx);
        assert!(matches!(rx.recv().await, Some(AppEvent::PollTick)));

        drop(poller);

        // The aborted task drops its sender, which closes the channel.
        while rx.recv().await.is_some() {}
    }
}
