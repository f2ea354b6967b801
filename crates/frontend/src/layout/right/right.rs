use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::window_event_listener;
use leptos::prelude::*;

const DEFAULT_WIDTH: f64 = 260.0;
const MIN_WIDTH: f64 = 30.0;
/// Room kept for the sidebar and the page itself
const RESERVED_WIDTH: f64 = 400.0 + 260.0;

/// Upper bound for the panel width at a given window width.
fn max_panel_width(window_width: f64) -> f64 {
    (window_width - RESERVED_WIDTH).min(window_width * 0.5).max(MIN_WIDTH)
}

#[component]
pub fn Right(children: Children) -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let is_open = move || ctx.right_open.get();

    let width = RwSignal::new(DEFAULT_WIDTH);
    let is_resizing = RwSignal::new(false);
    let start_x = RwSignal::new(0.0f64);
    let start_width = RwSignal::new(DEFAULT_WIDTH);

    let on_resize_start = move |ev: leptos::ev::MouseEvent| {
        if !is_open() {
            return;
        }
        is_resizing.set(true);
        start_x.set(ev.client_x() as f64);
        start_width.set(width.get_untracked());
        ev.prevent_default();
    };

    let _ = window_event_listener(leptos::ev::mousemove, move |ev: leptos::ev::MouseEvent| {
        if !is_resizing.get_untracked() {
            return;
        }
        let Some(window_width) = web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|w| w.as_f64())
        else {
            return;
        };

        let dx = start_x.get_untracked() - ev.client_x() as f64;
        let new_width = (start_width.get_untracked() + dx)
            .max(MIN_WIDTH)
            .min(max_panel_width(window_width));
        width.set(new_width);
    });

    let _ = window_event_listener(leptos::ev::mouseup, move |_ev: leptos::ev::MouseEvent| {
        if is_resizing.get_untracked() {
            is_resizing.set(false);
        }
    });

    // cursor and text selection follow the drag state
    Effect::new(move |_| {
        let resizing = is_resizing.get();
        if let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        {
            let (cursor, select) = if resizing { ("col-resize", "none") } else { ("", "") };
            let _ = body.style().set_property("cursor", cursor);
            let _ = body.style().set_property("user-select", select);
        }
    });

    view! {
        <div
            data-zone="right"
            class="right-panel"
            class:right-panel--hidden=move || !is_open()
            class:right-panel--resizing=move || is_resizing.get()
            style:width=move || if is_open() { format!("{}px", width.get()) } else { "0px".to_string() }
        >
            <div class="right-panel__resizer" on:mousedown=on_resize_start></div>
            {children()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_never_exceeds_half_the_window() {
        assert_eq!(max_panel_width(2000.0), 1000.0);
    }

    #[test]
    fn narrow_windows_keep_room_for_the_page() {
        assert_eq!(max_panel_width(1000.0), 340.0);
        assert_eq!(max_panel_width(500.0), MIN_WIDTH);
    }
}
