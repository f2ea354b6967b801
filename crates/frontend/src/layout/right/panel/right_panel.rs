//! Right side panel: open windows and a short data summary.

use super::windows_list::WindowsList;
use crate::shared::state::use_stores;
use leptos::prelude::*;

#[component]
pub fn RightPanel() -> impl IntoView {
    let stores = use_stores();
    let counts = move || {
        let (restaurants, menus) = stores
            .restaurants
            .with(|d| (d.restaurants().len(), d.menus().len()));
        let foods = stores.foods.with(|d| d.foods().len());
        let favorites = stores.favorites.with(|f| f.ids().len());
        (restaurants, menus, foods, favorites)
    };

    view! {
        <div class="app-panel__content">
            <WindowsList />
            <div class="panel-summary">
                <h3>"データ件数"</h3>
                <dl>
                    <dt>"レストラン"</dt><dd>{move || counts().0}</dd>
                    <dt>"メニュー"</dt><dd>{move || counts().1}</dd>
                    <dt>"食材"</dt><dd>{move || counts().2}</dd>
                    <dt>"お気に入り"</dt><dd>{move || counts().3}</dd>
                </dl>
            </div>
        </div>
    }
}
