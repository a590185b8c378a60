//! Dialog for registering a new device.

use devicehub_app::services::dashboard_service::DashboardService;
use devicehub_domain::id::DeviceTypeId;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::use_toasts;
use crate::api::HttpApi;
use crate::store::DashboardState;

/// Modal form creating a device of one of the loaded device types.
#[component]
pub fn AddDeviceForm(
    /// Called to close the dialog, after a successful creation or on cancel.
    #[prop(into)]
    on_close: Callback<()>,
) -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let state = expect_context::<DashboardState>();
    let toasts = use_toasts();

    let name = RwSignal::new(String::new());
    let device_type = RwSignal::new(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let service = DashboardService::new(api.clone(), toasts, state);
        let name_value = name.get_untracked();
        let device_type_id = DeviceTypeId::new(device_type.get_untracked());

        set_is_submitting.set(true);
        spawn_local(async move {
            let created = service.create_device(&name_value, &device_type_id).await;
            let _ = set_is_submitting.try_set(false);
            if created {
                let _ = name.try_set(String::new());
                let _ = device_type.try_set(String::new());
                on_close.run(());
            }
        });
    };

    view! {
        <div class="dialog-backdrop">
            <form class="dialog" on:submit=submit>
                <h2>"Add device"</h2>
                <label>
                    "Name"
                    <input type="text" placeholder="Greenhouse sensor" bind:value=name/>
                </label>
                <label>
                    "Device type"
                    <select
                        on:change=move |ev| device_type.set(event_target_value(&ev))
                        prop:value=move || device_type.get()
                    >
                        <option value="">"Select a device type"</option>
                        {move || {
                            state
                                .device_types
                                .get()
                                .into_iter()
                                .map(|t| view! { <option value=t.id.to_string()>{t.name}</option> })
                                .collect_view()
                        }}
                    </select>
                </label>
                <div class="dialog-actions">
                    <button type="button" class="btn-secondary" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" disabled=move || is_submitting.get()>
                        {move || if is_submitting.get() { "Adding\u{2026}" } else { "Add device" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
