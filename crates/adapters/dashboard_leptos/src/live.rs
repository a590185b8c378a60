//! Browser WebSocket adapter for the live feed.
//!
//! Socket callbacks feed an unbounded channel; the feed reads it through the
//! [`LiveConnection`] port. The whole feed runs as one abortable task owned
//! by a [`LiveFeedGuard`]: dropping the guard drops the task, which closes
//! the open socket and clears a pending reconnect timer.

use std::time::Duration;

use devicehub_app::live_feed::{LiveFeed, LiveHandler};
use devicehub_app::ports::{DashboardStore, LiveConnection, LiveError, LiveTransport, Sleeper};
use devicehub_app::services::dashboard_service::{DashboardService, LiveFollowup};
use devicehub_domain::connection::ConnectionState;
use devicehub_domain::id::UserId;
use devicehub_domain::live::LiveMessage;
use futures::StreamExt;
use futures::channel::mpsc;
use futures::future::{AbortHandle, abortable};
use gloo_timers::future::TimeoutFuture;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use crate::api::HttpApi;
use crate::components::ToastProvider;
use crate::store::DashboardState;

enum SocketEvent {
    Open,
    Frame(String),
    Error,
    Closed { code: u16, reason: String },
}

/// Opens browser WebSockets.
pub struct BrowserTransport;

/// An open browser WebSocket. Closing happens on drop.
pub struct BrowserConnection {
    socket: WebSocket,
    events: mpsc::UnboundedReceiver<SocketEvent>,
    _on_open: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

impl Drop for BrowserConnection {
    fn drop(&mut self) {
        self.socket.set_onopen(None);
        self.socket.set_onmessage(None);
        self.socket.set_onerror(None);
        self.socket.set_onclose(None);
        if let Err(err) = self.socket.close() {
            tracing::debug!(error = ?err, "failed to close live socket");
        }
    }
}

impl LiveTransport for BrowserTransport {
    type Connection = BrowserConnection;

    async fn connect(&self, url: &str) -> Result<BrowserConnection, LiveError> {
        let socket =
            WebSocket::new(url).map_err(|err| LiveError::Connect(format!("{err:?}")))?;
        let (tx, events) = mpsc::unbounded();

        let on_open = {
            let tx = tx.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                let _ = tx.unbounded_send(SocketEvent::Open);
            })
        };
        let on_message = {
            let tx = tx.clone();
            Closure::<dyn FnMut(MessageEvent)>::new(move |msg: MessageEvent| {
                match msg.data().as_string() {
                    Some(text) => {
                        let _ = tx.unbounded_send(SocketEvent::Frame(text));
                    }
                    None => tracing::debug!("ignoring binary live frame"),
                }
            })
        };
        let on_error = {
            let tx = tx.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                let _ = tx.unbounded_send(SocketEvent::Error);
            })
        };
        let on_close = Closure::<dyn FnMut(CloseEvent)>::new(move |event: CloseEvent| {
            let _ = tx.unbounded_send(SocketEvent::Closed {
                code: event.code(),
                reason: event.reason(),
            });
        });

        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        let mut connection = BrowserConnection {
            socket,
            events,
            _on_open: on_open,
            _on_message: on_message,
            _on_error: on_error,
            _on_close: on_close,
        };

        match connection.events.next().await {
            Some(SocketEvent::Open) => Ok(connection),
            Some(SocketEvent::Closed { code, reason }) => Err(LiveError::Connect(format!(
                "closed with code {code}: {reason}"
            ))),
            Some(SocketEvent::Error | SocketEvent::Frame(_)) | None => {
                Err(LiveError::Connect("socket error".to_string()))
            }
        }
    }
}

impl LiveConnection for BrowserConnection {
    async fn next_frame(&mut self) -> Option<Result<String, LiveError>> {
        loop {
            match self.events.next().await? {
                SocketEvent::Frame(text) => return Some(Ok(text)),
                SocketEvent::Error => {
                    return Some(Err(LiveError::Stream("socket error".to_string())));
                }
                SocketEvent::Closed { code, reason } => {
                    tracing::debug!(code, %reason, "live socket closed");
                    return None;
                }
                SocketEvent::Open => {}
            }
        }
    }
}

/// Waits with a browser timeout; dropping the wait clears the timeout.
pub struct TimerSleeper;

impl Sleeper for TimerSleeper {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}

/// Routes live events into the dashboard state.
pub struct DashboardLiveHandler {
    api: HttpApi,
    toasts: ToastProvider,
    state: DashboardState,
}

impl DashboardLiveHandler {
    pub fn new(api: HttpApi, toasts: ToastProvider, state: DashboardState) -> Self {
        Self { api, toasts, state }
    }
}

impl LiveHandler for DashboardLiveHandler {
    fn on_state(&self, state: ConnectionState) {
        self.state.set_connection(state);
    }

    fn on_message(&self, message: LiveMessage) {
        let service = DashboardService::new(self.api.clone(), self.toasts, self.state);
        if service.apply_live(message) == LiveFollowup::RefreshDevices {
            spawn_local(async move {
                service.refresh_devices().await;
            });
        }
    }
}

/// Keeps the live feed running. Drop to stop it.
pub struct LiveFeedGuard {
    handle: AbortHandle,
}

impl Drop for LiveFeedGuard {
    fn drop(&mut self) {
        tracing::info!("stopping live feed");
        self.handle.abort();
    }
}

/// Start the live feed for `user_id`'s dashboard.
pub fn spawn_live_feed(
    api: &HttpApi,
    user_id: &UserId,
    handler: DashboardLiveHandler,
) -> LiveFeedGuard {
    let url = api.config().dashboard_ws_url(user_id);
    let feed = LiveFeed::new(BrowserTransport, TimerSleeper)
        .with_delay(api.config().reconnect_delay());
    let (task, handle) = abortable(async move {
        feed.run(&url, &handler).await;
    });
    spawn_local(async move {
        if task.await.is_err() {
            tracing::debug!("live feed aborted");
        }
    });
    LiveFeedGuard { handle }
}
