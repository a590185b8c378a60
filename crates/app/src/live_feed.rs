//! Live feed: keeps the dashboard's live channel open for as long as the
//! future returned by [`LiveFeed::run`] is alive.
//!
//! Lifecycle of one attempt:
//!
//! 1. `Connecting`: ask the transport for a channel
//! 2. `Connected`: decode and forward every text frame
//! 3. `Disconnected`: on error or close, drop the channel
//! 4. wait the fixed reconnect delay, then start over
//!
//! There is no backoff and no retry cap. The loop owns the only channel, so
//! a new one is opened strictly after the previous one has been dropped.
//! Cancel the feed by dropping (or aborting) the `run` future: that closes
//! the open channel and clears a pending reconnect timer.

use std::time::Duration;

use devicehub_domain::connection::{ConnectionState, RECONNECT_DELAY};
use devicehub_domain::error::DecodeError;
use devicehub_domain::live::LiveMessage;

use crate::ports::{LiveConnection, LiveTransport, Sleeper};

/// Receives the feed's state transitions and decoded messages.
pub trait LiveHandler {
    fn on_state(&self, state: ConnectionState);
    fn on_message(&self, message: LiveMessage);
}

/// Fixed-delay reconnecting reader over a [`LiveTransport`].
pub struct LiveFeed<T, S> {
    transport: T,
    sleeper: S,
    delay: Duration,
}

impl<T: LiveTransport, S: Sleeper> LiveFeed<T, S> {
    /// Create a feed using the standard 3-second reconnect delay.
    pub fn new(transport: T, sleeper: S) -> Self {
        Self {
            transport,
            sleeper,
            delay: RECONNECT_DELAY,
        }
    }

    /// Override the reconnect delay.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Keep a channel to `url` open forever, reconnecting after every close
    /// or error.
    pub async fn run(&self, url: &str, handler: &impl LiveHandler) {
        loop {
            self.attempt(url, handler).await;
            tracing::info!(
                delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX),
                "live channel down, scheduling reconnect"
            );
            self.sleeper.sleep(self.delay).await;
        }
    }

    #[tracing::instrument(skip(self, handler))]
    async fn attempt(&self, url: &str, handler: &impl LiveHandler) {
        handler.on_state(ConnectionState::Connecting);
        let mut connection = match self.transport.connect(url).await {
            Ok(connection) => connection,
            Err(err) => {
                tracing::warn!(error = %err, "live channel failed to open");
                handler.on_state(ConnectionState::Disconnected);
                return;
            }
        };
        tracing::info!("live channel connected");
        handler.on_state(ConnectionState::Connected);

        while let Some(frame) = connection.next_frame().await {
            match frame {
                Ok(text) => forward(&text, handler),
                Err(err) => {
                    tracing::warn!(error = %err, "live channel error");
                    break;
                }
            }
        }

        drop(connection);
        tracing::info!("live channel closed");
        handler.on_state(ConnectionState::Disconnected);
    }
}

fn forward(frame: &str, handler: &impl LiveHandler) {
    match LiveMessage::decode(frame) {
        Ok(message) => handler.on_message(message),
        Err(DecodeError::UnknownType(kind)) => {
            tracing::debug!(%kind, "ignoring live message of unknown type");
        }
        Err(err @ DecodeError::Malformed(_)) => {
            tracing::warn!(error = %err, "dropping malformed live message");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::future::Future;
    use std::rc::Rc;

    use devicehub_domain::device::DeviceStatus;
    use devicehub_domain::id::DeviceId;
    use devicehub_domain::live::UpdateOutcome;
    use futures::FutureExt;

    use super::*;
    use crate::ports::LiveError;

    enum Script {
        Refuse,
        Serve(Vec<Result<String, LiveError>>),
    }

    #[derive(Default)]
    struct OpenGauge {
        open: Cell<usize>,
        max_open: Cell<usize>,
    }

    struct FakeTransport {
        script: RefCell<VecDeque<Script>>,
        connects: Cell<usize>,
        gauge: Rc<OpenGauge>,
    }

    impl FakeTransport {
        fn new(script: Vec<Script>) -> Self {
            Self {
                script: RefCell::new(script.into()),
                connects: Cell::new(0),
                gauge: Rc::default(),
            }
        }
    }

    struct FakeConnection {
        frames: VecDeque<Result<String, LiveError>>,
        gauge: Rc<OpenGauge>,
    }

    impl Drop for FakeConnection {
        fn drop(&mut self) {
            self.gauge.open.set(self.gauge.open.get() - 1);
        }
    }

    impl LiveConnection for FakeConnection {
        fn next_frame(&mut self) -> impl Future<Output = Option<Result<String, LiveError>>> {
            let next = self.frames.pop_front();
            async move { next }
        }
    }

    impl LiveTransport for FakeTransport {
        type Connection = FakeConnection;

        async fn connect(&self, _url: &str) -> Result<FakeConnection, LiveError> {
            self.connects.set(self.connects.get() + 1);
            let step = self.script.borrow_mut().pop_front();
            match step {
                None => std::future::pending().await,
                Some(Script::Refuse) => Err(LiveError::Connect("refused".to_string())),
                Some(Script::Serve(frames)) => {
                    let open = self.gauge.open.get() + 1;
                    self.gauge.open.set(open);
                    self.gauge.max_open.set(self.gauge.max_open.get().max(open));
                    Ok(FakeConnection {
                        frames: frames.into(),
                        gauge: Rc::clone(&self.gauge),
                    })
                }
            }
        }
    }

    /// Completes immediately, remembering how long it was asked to wait and
    /// how many channels were still open at that moment.
    struct RecordingSleeper {
        waits: RefCell<Vec<(Duration, usize)>>,
        gauge: Rc<OpenGauge>,
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
            self.waits
                .borrow_mut()
                .push((duration, self.gauge.open.get()));
            async {}
        }
    }

    #[derive(Default)]
    struct RecordingHandler {
        states: RefCell<Vec<ConnectionState>>,
        messages: RefCell<Vec<LiveMessage>>,
    }

    impl LiveHandler for RecordingHandler {
        fn on_state(&self, state: ConnectionState) {
            self.states.borrow_mut().push(state);
        }

        fn on_message(&self, message: LiveMessage) {
            self.messages.borrow_mut().push(message);
        }
    }

    fn feed(script: Vec<Script>) -> LiveFeed<FakeTransport, RecordingSleeper> {
        let transport = FakeTransport::new(script);
        let sleeper = RecordingSleeper {
            waits: RefCell::default(),
            gauge: Rc::clone(&transport.gauge),
        };
        LiveFeed::new(transport, sleeper)
    }

    /// Drive the feed until the script runs out (the next connect pends).
    fn run_until_idle(
        feed: &LiveFeed<FakeTransport, RecordingSleeper>,
        handler: &RecordingHandler,
    ) {
        let finished = feed.run("ws://hub/ws/dashboard/u1", handler).now_or_never();
        assert!(finished.is_none(), "feed must never stop on its own");
    }

    fn status_frame(id: &str, status: &str) -> Result<String, LiveError> {
        Ok(format!(
            r#"{{"type":"device_status","device_id":"{id}","status":"{status}"}}"#
        ))
    }

    #[test]
    fn should_walk_through_states_on_close() {
        let feed = feed(vec![Script::Serve(vec![])]);
        let handler = RecordingHandler::default();

        run_until_idle(&feed, &handler);

        assert_eq!(
            *handler.states.borrow(),
            vec![
                ConnectionState::Connecting,
                ConnectionState::Connected,
                ConnectionState::Disconnected,
                ConnectionState::Connecting,
            ]
        );
    }

    #[test]
    fn should_wait_one_fixed_delay_after_each_close_or_error() {
        let feed = feed(vec![
            Script::Serve(vec![status_frame("d1", "online")]),
            Script::Serve(vec![Err(LiveError::Stream("reset".to_string()))]),
            Script::Refuse,
        ]);
        let handler = RecordingHandler::default();

        run_until_idle(&feed, &handler);

        let waits = feed.sleeper.waits.borrow();
        assert_eq!(waits.len(), 3);
        assert!(waits.iter().all(|(d, _)| *d == Duration::from_secs(3)));
        assert_eq!(feed.transport.connects.get(), 4);
    }

    #[test]
    fn should_close_channel_before_waiting_and_never_hold_two() {
        let feed = feed(vec![
            Script::Serve(vec![status_frame("d1", "online")]),
            Script::Serve(vec![status_frame("d1", "offline")]),
        ]);
        let handler = RecordingHandler::default();

        run_until_idle(&feed, &handler);

        assert!(feed.sleeper.waits.borrow().iter().all(|(_, open)| *open == 0));
        assert_eq!(feed.transport.gauge.max_open.get(), 1);
    }

    #[test]
    fn should_retry_after_refused_connection_without_marking_connected() {
        let feed = feed(vec![Script::Refuse]);
        let handler = RecordingHandler::default();

        run_until_idle(&feed, &handler);

        assert_eq!(
            *handler.states.borrow(),
            vec![
                ConnectionState::Connecting,
                ConnectionState::Disconnected,
                ConnectionState::Connecting,
            ]
        );
        assert_eq!(feed.sleeper.waits.borrow().len(), 1);
    }

    #[test]
    fn should_forward_decoded_messages_and_skip_bad_frames() {
        let feed = feed(vec![Script::Serve(vec![
            status_frame("d1", "online"),
            Ok(r#"{"type":"ping"}"#.to_string()),
            Ok("garbage".to_string()),
            status_frame("d2", "offline"),
        ])]);
        let handler = RecordingHandler::default();

        run_until_idle(&feed, &handler);

        assert_eq!(
            *handler.messages.borrow(),
            vec![
                LiveMessage::DeviceStatus {
                    device_id: DeviceId::new("d1"),
                    status: DeviceStatus::Online,
                },
                LiveMessage::DeviceStatus {
                    device_id: DeviceId::new("d2"),
                    status: DeviceStatus::Offline,
                },
            ]
        );
    }

    #[test]
    fn should_forward_firmware_status_without_outcome() {
        let feed = feed(vec![Script::Serve(vec![Ok(
            r#"{"type":"firmware_update_status","device_id":"d1","status":null,"version":"1.0.1"}"#
                .to_string(),
        )])]);
        let handler = RecordingHandler::default();

        run_until_idle(&feed, &handler);

        assert_eq!(
            *handler.messages.borrow(),
            vec![LiveMessage::FirmwareUpdateStatus {
                device_id: DeviceId::new("d1"),
                status: UpdateOutcome::Success,
                version: Some("1.0.1".to_string()),
            }]
        );
    }

    #[test]
    fn should_honour_custom_delay() {
        let feed = feed(vec![Script::Refuse]).with_delay(Duration::from_millis(250));
        let handler = RecordingHandler::default();

        run_until_idle(&feed, &handler);

        assert_eq!(
            feed.sleeper.waits.borrow()[0].0,
            Duration::from_millis(250)
        );
    }

    /// A channel that stays open without ever yielding a frame.
    struct IdleConnection(Rc<OpenGauge>);

    impl Drop for IdleConnection {
        fn drop(&mut self) {
            self.0.open.set(self.0.open.get() - 1);
        }
    }

    impl LiveConnection for IdleConnection {
        fn next_frame(&mut self) -> impl Future<Output = Option<Result<String, LiveError>>> {
            std::future::pending()
        }
    }

    struct IdleTransport(Rc<OpenGauge>);

    impl LiveTransport for IdleTransport {
        type Connection = IdleConnection;

        async fn connect(&self, _url: &str) -> Result<IdleConnection, LiveError> {
            self.0.open.set(self.0.open.get() + 1);
            Ok(IdleConnection(Rc::clone(&self.0)))
        }
    }

    #[test]
    fn should_release_open_channel_when_cancelled() {
        let gauge = Rc::new(OpenGauge::default());
        let sleeper = RecordingSleeper {
            waits: RefCell::default(),
            gauge: Rc::clone(&gauge),
        };
        let feed = LiveFeed::new(IdleTransport(Rc::clone(&gauge)), sleeper);
        let handler = RecordingHandler::default();

        let mut run = Box::pin(feed.run("ws://hub/ws/dashboard/u1", &handler));
        assert!((&mut run).now_or_never().is_none());
        assert_eq!(gauge.open.get(), 1);

        drop(run);
        assert_eq!(gauge.open.get(), 0);
        assert!(feed.sleeper.waits.borrow().is_empty());
    }
}
