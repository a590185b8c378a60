use devicehub_domain::connection::ConnectionState;
use leptos::prelude::*;

/// Shows whether live updates are flowing.
#[component]
pub fn ConnectionBadge(#[prop(into)] state: Signal<ConnectionState>) -> impl IntoView {
    let class = move || match state.get() {
        ConnectionState::Connected => "badge badge-online",
        ConnectionState::Connecting => "badge badge-pending",
        ConnectionState::Disconnected => "badge badge-offline",
    };

    view! {
        <span class=class title="Live updates">
            {move || match state.get() {
                ConnectionState::Connected => "Live",
                ConnectionState::Connecting => "Connecting\u{2026}",
                ConnectionState::Disconnected => "Offline",
            }}
        </span>
    }
}
