//! Filter Tabs Component
//!
//! Reusable tab row for list filters. An empty value means "all".

use leptos::prelude::*;

/// Blog post type tabs
pub const POST_TYPE_TABS: &[(&str, &str)] = &[
    ("", "All"),
    ("BLOG", "Blog"),
    ("NOTICE", "Notice"),
    ("EXHIBITION", "Exhibition"),
    ("AWARD", "Award"),
    ("NEWS", "News"),
    ("STUDIO", "Studio"),
];

/// Artwork status tabs
pub const ARTWORK_STATUS_TABS: &[(&str, &str)] = &[
    ("", "All"),
    ("work_in_progress", "In progress"),
    ("completed", "Completed"),
    ("archived", "Archived"),
];

/// Tab buttons for a list filter
#[component]
pub fn FilterTabs(
    tabs: &'static [(&'static str, &'static str)],
    #[prop(into)] current: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    /// Values hidden from this viewer (e.g. owner-only types)
    #[prop(optional)]
    hidden: Vec<&'static str>,
) -> impl IntoView {
    view! {
        <div class="filter-tabs" role="tablist">
            {tabs.iter()
                .filter(|(value, _)| !hidden.contains(value))
                .map(|(value, label)| {
                    let val = value.to_string();
                    let val_clone = val.clone();
                    let is_selected = move || current.get() == val;
                    view! {
                        <button
                            type="button"
                            role="tab"
                            class=move || if is_selected() { "filter-tab active" } else { "filter-tab" }
                            on:click=move |_| on_change.run(val_clone.clone())
                        >
                            {*label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
