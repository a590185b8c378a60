use devicehub_domain::connection::ConnectionState;
use leptos::prelude::*;
use leptos_router::components::A;

use super::ConnectionBadge;

#[component]
pub fn Nav(
    /// Name of the logged-in user.
    username: String,
    #[prop(into)] connection: Signal<ConnectionState>,
    #[prop(into)] on_logout: Callback<()>,
) -> impl IntoView {
    view! {
        <nav>
            <span class="brand">"DeviceHub"</span>
            <ul>
                <li><A href="/">"Devices"</A></li>
                <li><A href="/firmware">"Firmware"</A></li>
                <li><A href="/settings">"Settings"</A></li>
            </ul>
            <div class="nav-session">
                <ConnectionBadge state=connection/>
                <span class="username">{username}</span>
                <button class="btn-secondary" on:click=move |_| on_logout.run(())>
                    "Log out"
                </button>
            </div>
        </nav>
    }
}
