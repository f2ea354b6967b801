use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

#[component]
pub fn Modal(
    /// Title of the modal
    #[prop(into)]
    title: String,
    /// Callback when modal should close
    on_close: Callback<()>,
    /// Wider body for tables and charts
    #[prop(optional)]
    wide: bool,
    children: Children,
) -> impl IntoView {
    // Removed again when the modal unmounts
    let escape = window_event_listener(ev::keydown, move |event| {
        if event.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || escape.remove());

    let stop_propagation = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class=if wide { "modal modal--wide" } else { "modal" } on:click=stop_propagation>
                <div class="modal-header">
                    <h2 class="modal-title">{title}</h2>
                    <div class="modal-header-actions">
                        <button class="button button--icon modal__close" on:click=move |_| on_close.run(())>
                            {icon("x")}
                        </button>
                    </div>
                </div>
                <div class="modal-body">
                    {children()}
                </div>
            </div>
        </div>
    }
}

/// Record a details modal was opened for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTarget {
    New,
    Edit(String),
}

impl FormTarget {
    pub fn id(&self) -> Option<String> {
        match self {
            FormTarget::New => None,
            FormTarget::Edit(id) => Some(id.clone()),
        }
    }
}
