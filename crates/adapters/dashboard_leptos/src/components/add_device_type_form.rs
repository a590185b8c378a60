//! Inline form for defining a new device type.

use devicehub_app::services::dashboard_service::DashboardService;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::use_toasts;
use crate::api::HttpApi;
use crate::store::DashboardState;

/// Creates a device type and resets itself; the type list refreshes on
/// success.
#[component]
pub fn AddDeviceTypeForm() -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let state = expect_context::<DashboardState>();
    let toasts = use_toasts();

    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let service = DashboardService::new(api.clone(), toasts, state);
        let name_value = name.get_untracked();
        let description_value = description.get_untracked();

        set_is_submitting.set(true);
        spawn_local(async move {
            let created = service
                .create_device_type(&name_value, &description_value)
                .await;
            set_is_submitting.set(false);
            if created {
                name.set(String::new());
                description.set(String::new());
            }
        });
    };

    view! {
        <form class="inline-form" on:submit=submit>
            <h2>"Add device type"</h2>
            <label>
                "Name"
                <input type="text" placeholder="ESP32 DevKit" bind:value=name/>
            </label>
            <label>
                "Description"
                <input type="text" bind:value=description/>
            </label>
            <button type="submit" disabled=move || is_submitting.get()>
                {move || if is_submitting.get() { "Saving\u{2026}" } else { "Add device type" }}
            </button>
        </form>
    }
}
