use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// Already formatted value
    #[prop(into)]
    value: Signal<String>,
    #[prop(optional)]
    unit: &'static str,
) -> impl IntoView {
    view! {
        <div class="stat-card">
            <div class="stat-card__icon">{icon(icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">
                    {move || value.get()}
                    <span class="stat-card__unit">{unit}</span>
                </div>
            </div>
        </div>
    }
}

/// Horizontal bar filled to `percent` (clamped to 0..=100)
#[component]
pub fn ProgressBar(
    #[prop(into)]
    percent: Signal<f64>,
    #[prop(optional)]
    class: &'static str,
) -> impl IntoView {
    let width = move || format!("width: {:.1}%;", percent.get().clamp(0.0, 100.0));
    view! {
        <div class=format!("progress {}", class)>
            <div class="progress__fill" style=width></div>
        </div>
    }
}
