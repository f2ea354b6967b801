//! Open tabs in the right panel, most recent last.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

/// Sidebar icon for a tab key, by key prefix
fn icon_for_key(key: &str) -> &'static str {
    match key {
        k if k.starts_with("a001_") => "restaurant",
        k if k.starts_with("a002_") => "menu",
        k if k.starts_with("a003_") => "food",
        k if k.starts_with("a004_") => "category",
        "u501_import_chain_menus" => "import",
        "u502_meal_planner" => "planner",
        _ => "data",
    }
}

#[component]
pub fn WindowsList() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let close_others = move |_| {
        let Some(keep) = ctx.active.get_untracked() else {
            return;
        };
        let others: Vec<String> = ctx.opened.with_untracked(|tabs| {
            tabs.iter()
                .filter(|t| t.key != keep)
                .map(|t| t.key.clone())
                .collect()
        });
        for key in others {
            ctx.close_tab(&key);
        }
    };

    view! {
        <div class="windows-list">
            <div class="windows-list__header">
                <h3>"開いているページ"</h3>
                <span class="windows-list__count">
                    {move || format!("({})", ctx.opened.with(|t| t.len()))}
                </span>
                <Show when=move || ctx.opened.with(|t| t.len() > 1)>
                    <button class="button button--link" on:click=close_others>
                        "他を閉じる"
                    </button>
                </Show>
            </div>

            <div class="windows-list__items">
                {move || {
                    let tabs = ctx.opened.get();
                    if tabs.is_empty() {
                        return view! {
                            <div class="windows-list__empty">"開いているページはありません"</div>
                        }.into_any();
                    }
                    tabs.into_iter().map(|tab| {
                        let is_active = ctx.active.with(|a| a.as_ref() == Some(&tab.key));
                        let key_for_switch = tab.key.clone();
                        let key_for_close = tab.key.clone();

                        view! {
                            <div
                                class="windows-list__item"
                                class:windows-list__item--active=is_active
                                on:click=move |_| ctx.activate_tab(&key_for_switch)
                            >
                                {icon(icon_for_key(&tab.key))}
                                <span class="windows-list__item-title">{tab.title.clone()}</span>
                                <button
                                    class="windows-list__item-close"
                                    title="閉じる"
                                    on:click=move |ev: ev::MouseEvent| {
                                        ev.stop_propagation();
                                        ctx.close_tab(&key_for_close);
                                    }
                                >
                                    {icon("x")}
                                </button>
                            </div>
                        }
                    }).collect_view().into_any()
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browse_tabs_share_the_entity_icon() {
        assert_eq!(icon_for_key("a002_menu_browse"), icon_for_key("a002_menu"));
        assert_eq!(icon_for_key("u503_food_exchange"), "data");
    }
}
