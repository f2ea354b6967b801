//! Top bar: application title and panel toggles.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let is_sidebar_visible = move || ctx.left_open.get();
    let is_right_panel_visible = move || ctx.right_open.get();
    let active_title = move || {
        ctx.active.with(|active| {
            active.as_ref().and_then(|key| {
                ctx.opened
                    .with(|tabs| tabs.iter().find(|t| &t.key == key).map(|t| t.title.clone()))
            })
        })
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "ナビゲーションを隠す" } else { "ナビゲーションを表示" }
                >
                    {icon("panel-left")}
                </button>
                <span class="top-header__title">"栄養ナビ 管理コンソール"</span>
                {move || active_title().map(|t| view! {
                    <span class="top-header__crumb">{format!("/ {}", t)}</span>
                })}
            </div>

            <div class="top-header__actions">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.open_tab("u503_food_exchange", tab_label_for_key("u503_food_exchange"))
                    title="データ管理"
                >
                    {icon("data")}
                </button>
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_right()
                    title=move || if is_right_panel_visible() { "右パネルを隠す" } else { "右パネルを表示" }
                >
                    {icon("panel-right")}
                </button>
            </div>
        </div>
    }
}
