//! Stat card component for the device counters.

use leptos::prelude::*;

/// A card displaying a label and a live count.
#[component]
pub fn StatCard(
    /// The label shown above the value.
    #[prop(into)]
    label: String,
    /// The count to display, recomputed on every change.
    #[prop(into)]
    value: Signal<usize>,
    /// Extra CSS class for colouring (e.g. `online`).
    #[prop(optional, into)]
    variant: String,
) -> impl IntoView {
    view! {
        <div class=format!("stat-card {variant}")>
            <span class="stat-label">{label}</span>
            <span class="stat-value">{move || value.get()}</span>
        </div>
    }
}
