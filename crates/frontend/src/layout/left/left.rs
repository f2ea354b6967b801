use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::state::use_stores;
use leptos::prelude::*;

/// Left column: navigation plus a favorites shortcut at the bottom.
#[component]
pub fn Left(children: Children) -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");
    let stores = use_stores();
    let favorite_count = move || stores.favorites.with(|f| f.ids().len());

    view! {
        <div data-zone="left" class="left" class:hidden=move || !ctx.left_open.get()>
            {children()}
            <div class="app-sidebar__footer">
                <button
                    class="button button--link"
                    on:click=move |_| ctx.open_tab("a002_menu_browse", tab_label_for_key("a002_menu_browse"))
                >
                    {move || format!("♥ お気に入り {} 件", favorite_count())}
                </button>
            </div>
        </div>
    }
}
