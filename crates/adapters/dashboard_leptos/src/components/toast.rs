//! Toast notifications: the browser side of the [`Notifier`] port.

use devicehub_app::ports::{Notice, NoticeLevel, Notifier};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// A single toast message.
#[derive(Debug, Clone)]
pub struct ToastMessage {
    /// Unique id for keyed rendering.
    pub id: u32,
    pub level: NoticeLevel,
    /// The message body to display.
    pub text: String,
}

impl ToastMessage {
    fn class(&self) -> &'static str {
        match self.level {
            NoticeLevel::Info => "toast toast-info",
            NoticeLevel::Success => "toast toast-success",
            NoticeLevel::Error => "toast toast-error",
        }
    }
}

/// Reactive context providing toast mutation methods.
#[derive(Clone, Copy)]
pub struct ToastProvider {
    set_toasts: WriteSignal<Vec<ToastMessage>>,
    next_id: ReadSignal<u32>,
    set_next_id: WriteSignal<u32>,
    timeout_ms: u32,
}

impl ToastProvider {
    /// Push a toast. It auto-dismisses after the configured timeout.
    pub fn push(&self, level: NoticeLevel, text: String) {
        let id = self.next_id.get_untracked();
        self.set_next_id.set(id + 1);

        self.set_toasts.update(|list| {
            list.push(ToastMessage { id, level, text });
        });

        let set_toasts = self.set_toasts;
        let timeout_ms = self.timeout_ms;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(timeout_ms).await;
            set_toasts.update(|list| {
                list.retain(|t| t.id != id);
            });
        });
    }

    /// Dismiss a toast immediately by id.
    pub fn dismiss(&self, id: u32) {
        self.set_toasts.update(|list| {
            list.retain(|t| t.id != id);
        });
    }
}

impl Notifier for ToastProvider {
    fn notify(&self, notice: Notice) {
        self.push(notice.level, notice.text);
    }
}

/// Access the toast provider from Leptos context.
///
/// Must be called within a component tree that has a [`ToastContainer`] ancestor.
pub fn use_toasts() -> ToastProvider {
    expect_context::<ToastProvider>()
}

/// Container component that provides toast context and renders active toasts.
///
/// Place this once near the root of the component tree (e.g. inside `<App/>`).
#[component]
pub fn ToastContainer(
    /// How long each toast stays visible.
    timeout_ms: u32,
    children: Children,
) -> impl IntoView {
    let (toasts, set_toasts) = signal(Vec::<ToastMessage>::new());
    let (next_id, set_next_id) = signal(0_u32);

    let provider = ToastProvider {
        set_toasts,
        next_id,
        set_next_id,
        timeout_ms,
    };

    provide_context(provider);

    view! {
        {children()}
        <div class="toast-container">
            {move || {
                toasts
                    .get()
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;
                        let class = toast.class();
                        view! {
                            <div class=class>
                                <button
                                    class="toast-dismiss"
                                    on:click=move |_| provider.dismiss(id)
                                >
                                    "\u{00D7}"
                                </button>
                                {toast.text}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
