use crate::domain::a001_restaurant::ui::details::RestaurantDetails;
use crate::shared::components::{PageHeader, Thumbnail};
use crate::shared::dialogs::confirm;
use crate::shared::icons::icon;
use crate::shared::list_utils::{options_with_all, SearchInput};
use crate::shared::modal::{FormTarget, Modal};
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::state::use_stores;
use contracts::domain::a001_restaurant::{distinct_categories, Restaurant, RestaurantFilter};
use leptos::prelude::*;
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
pub struct RestaurantRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub logo: Option<String>,
    pub locations: String,
    pub established: String,
    pub menu_count: usize,
}

impl RestaurantRow {
    fn new(r: &Restaurant, menu_count: usize) -> Self {
        Self {
            id: r.id.0.clone(),
            name: r.name.clone(),
            category: r.category.clone(),
            logo: r.logo.src().map(str::to_string),
            locations: r.locations.join("、"),
            established: r.established.clone(),
            menu_count,
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn RestaurantList() -> impl IntoView {
    let stores = use_stores();
    let search = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let editing = RwSignal::new(None::<FormTarget>);

    let categories = Memo::new(move |_| stores.restaurants.with(|d| distinct_categories(d.restaurants())));

    let rows = Memo::new(move |_| {
        let filter = RestaurantFilter { search: search.get(), category: category.get() };
        stores.restaurants.with(|d| {
            let counts = d.menu_counts();
            filter
                .apply(d.restaurants())
                .into_iter()
                .map(|r| RestaurantRow::new(r, counts.get(&r.id.0).copied().unwrap_or(0)))
                .collect::<Vec<_>>()
        })
    });

    let total = move || stores.restaurants.with(|d| d.restaurants().len());

    let handle_delete = move |row: RestaurantRow| {
        let message = if row.menu_count > 0 {
            format!(
                "「{}」を削除しますか？\n関連するメニュー {} 件も削除されます。",
                row.name, row.menu_count
            )
        } else {
            format!("「{}」を削除しますか？", row.name)
        };
        if !confirm(&message) {
            return;
        }
        let result = stores.with_restaurants(|d, now| d.delete_restaurant(&row.id, now));
        if let Some(removed) = stores.report(result) {
            stores
                .notices
                .success(format!("「{}」を削除しました（メニュー {} 件）", row.name, removed));
        }
    };

    view! {
        <PageFrame page_id="a001_restaurant--list" category=PageCategory::List>
            <PageHeader
                title="レストラン管理"
                subtitle=Signal::derive(move || format!("{} 件", total()))
            >
                <button class="button button--primary" on:click=move |_| editing.set(Some(FormTarget::New))>
                    {icon("plus")}
                    "レストランを追加"
                </button>
            </PageHeader>

            {move || stores.restaurants.with(|d| d.load_error().map(str::to_string)).map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="filter-bar">
                <SearchInput
                    value=search
                    on_change=Callback::new(move |v| search.set(v))
                    placeholder="レストラン名・説明で検索"
                />
                <Select value=category>
                    {move || options_with_all(
                        "すべてのカテゴリー",
                        categories.get().into_iter().map(|c| (c.clone(), c)).collect(),
                    )}
                </Select>
            </div>

            <Show when=move || stores.restaurants_loading.get()>
                <div class="page__loading"><Spinner /></div>
            </Show>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"ロゴ"</th>
                            <th class="table__header-cell">"レストラン名"</th>
                            <th class="table__header-cell">"カテゴリー"</th>
                            <th class="table__header-cell">"展開地域"</th>
                            <th class="table__header-cell">"創業"</th>
                            <th class="table__header-cell table__header-cell--number">"メニュー数"</th>
                            <th class="table__header-cell">"操作"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || rows.get()
                            key=|row| (row.id.clone(), row.name.clone(), row.logo.clone(), row.menu_count)
                            children=move |row: RestaurantRow| {
                                let edit_id = row.id.clone();
                                let delete_row = row.clone();
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell"><Thumbnail src=row.logo.clone() alt=row.name.clone() /></td>
                                        <td class="table__cell">{row.name.clone()}</td>
                                        <td class="table__cell">{row.category.clone()}</td>
                                        <td class="table__cell">{row.locations.clone()}</td>
                                        <td class="table__cell">{row.established.clone()}</td>
                                        <td class="table__cell table__cell--number">{row.menu_count}</td>
                                        <td class="table__cell table__cell--actions">
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Secondary
                                                on_click=move |_| editing.set(Some(FormTarget::Edit(edit_id.clone())))
                                            >
                                                "編集"
                                            </Button>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| handle_delete(delete_row.clone())
                                            >
                                                "削除"
                                            </Button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <Show when=move || rows.with(|r| r.is_empty()) && !stores.restaurants_loading.get()>
                    <div class="table__empty">"該当するレストランがありません"</div>
                </Show>
            </div>

            {move || editing.get().map(|target| {
                let title = match target {
                    FormTarget::New => "レストランを追加",
                    FormTarget::Edit(_) => "レストランを編集",
                };
                let close = Callback::new(move |_| editing.set(None));
                view! {
                    <Modal title=title on_close=close>
                        <RestaurantDetails id=target.id() on_saved=close on_cancel=close />
                    </Modal>
                }
            })}
        </PageFrame>
    }
}
