//! Main layout: sidebar, tabs and right panel inside the shell.

use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::left::Sidebar;
use crate::layout::right::panel::RightPanel;
use crate::layout::tabs::{tab_label_for_key, TabPage};
use crate::layout::Shell;
use leptos::prelude::*;

/// Tab opened when the address bar names none
const DEFAULT_TAB: &str = "a002_menu_browse";

/// Restores the `?active=` tab or opens the default one, then renders the shell.
#[component]
pub fn MainLayout() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    if !tabs_store.init_router_integration() {
        tabs_store.open_tab(DEFAULT_TAB, tab_label_for_key(DEFAULT_TAB));
    }

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=move || {
                view! {
                    <For
                        each=move || tabs_store.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab: TabData| {
                            view! { <TabPage tab=tab tabs_store=tabs_store /> }
                        }
                    />
                    <Show when=move || tabs_store.opened.with(|t| t.is_empty())>
                        <div class="placeholder">"左のメニューからページを選んでください"</div>
                    </Show>
                }.into_any()
            }
            right=|| view! { <RightPanel /> }.into_any()
        />
    }
}
