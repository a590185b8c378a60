use devicehub_domain::dashboard::DeviceCounts;
use leptos::prelude::*;

use crate::components::{AddDeviceForm, DeviceCard, Loading, StatCard};
use crate::store::DashboardState;

/// Devices page: counters, the add-device dialog and one card per device.
#[component]
pub fn Devices() -> impl IntoView {
    let state = expect_context::<DashboardState>();
    let (show_add, set_show_add) = signal(false);

    let counts = move || state.devices.with(|devices| DeviceCounts::of(devices));
    let total = Signal::derive(move || counts().total);
    let online = Signal::derive(move || counts().online);
    let offline = Signal::derive(move || counts().offline);
    let is_empty = Memo::new(move |_| state.devices.with(Vec::is_empty));

    view! {
        <div>
            <div class="page-header">
                <h1>"Devices"</h1>
                <button on:click=move |_| set_show_add.set(true)>"Add device"</button>
            </div>
            <div class="stat-grid">
                <StatCard label="Total" value=total/>
                <StatCard label="Online" value=online variant="online"/>
                <StatCard label="Offline" value=offline variant="offline"/>
            </div>
            <Show when=move || show_add.get()>
                <AddDeviceForm on_close=move |()| set_show_add.set(false)/>
            </Show>
            {move || {
                if !state.loaded.get() {
                    view! { <Loading message="Loading devices\u{2026}"/> }.into_any()
                } else if is_empty.get() {
                    view! { <p>"No devices yet. Add one to get started."</p> }.into_any()
                } else {
                    view! {
                        <div class="device-grid">
                            <For
                                each=move || state.devices.with(|devices| {
                                    devices.iter().map(|d| d.id.clone()).collect::<Vec<_>>()
                                })
                                key=|id| id.clone()
                                children=|id| view! { <DeviceCard id/> }
                            />
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}
