use crate::domain::a002_menu::ui::details::MenuDetails;
use crate::shared::components::{PageHeader, Thumbnail};
use crate::shared::dialogs::confirm;
use crate::shared::icons::icon;
use crate::shared::list_utils::{options_with_all, SearchInput};
use crate::shared::modal::{FormTarget, Modal};
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::state::use_stores;
use contracts::domain::a001_restaurant::Restaurant;
use contracts::domain::a002_menu::filter::distinct_categories;
use contracts::domain::a002_menu::{Menu, MenuFilter};
use contracts::domain::common::display_date;
use leptos::prelude::*;
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
pub struct MenuRow {
    pub id: String,
    pub name: String,
    pub restaurant_name: String,
    pub category: String,
    /// Own image, falling back to the restaurant logo
    pub image: Option<String>,
    pub price: u32,
    pub calories: u32,
    pub protein: f64,
    pub available: bool,
    pub updated: String,
}

impl MenuRow {
    fn new(m: &Menu, parent: Option<&Restaurant>) -> Self {
        let image = m
            .image
            .src()
            .or_else(|| parent.and_then(|r| r.logo.src()))
            .map(str::to_string);
        Self {
            id: m.id.0.clone(),
            name: m.name.clone(),
            restaurant_name: parent.map(|r| r.name.clone()).unwrap_or_else(|| "不明".to_string()),
            category: m.category.clone(),
            image,
            price: m.price,
            calories: m.nutrition.calories,
            protein: m.nutrition.protein,
            available: m.available,
            updated: m.updated_key().map(display_date).unwrap_or_default(),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn MenuList() -> impl IntoView {
    let stores = use_stores();
    let search = RwSignal::new(String::new());
    let restaurant_id = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let editing = RwSignal::new(None::<FormTarget>);

    let restaurant_options = Memo::new(move |_| {
        stores.restaurants.with(|d| {
            d.restaurants()
                .iter()
                .map(|r| (r.id.0.clone(), r.name.clone()))
                .collect::<Vec<_>>()
        })
    });
    let categories = Memo::new(move |_| stores.restaurants.with(|d| distinct_categories(d.menus())));

    let rows = Memo::new(move |_| {
        let filter = MenuFilter {
            search: search.get(),
            restaurant_id: restaurant_id.get(),
            category: category.get(),
            ..MenuFilter::default()
        };
        stores.restaurants.with(|d| {
            filter
                .apply(d.menus())
                .into_iter()
                .map(|m| MenuRow::new(m, d.parent_of(m)))
                .collect::<Vec<_>>()
        })
    });

    let total = move || stores.restaurants.with(|d| d.menus().len());

    let handle_delete = move |row: MenuRow| {
        if !confirm(&format!("「{}」を削除しますか？", row.name)) {
            return;
        }
        let result = stores.with_restaurants(|d, now| d.delete_menu(&row.id, now));
        if stores.report(result).is_some() {
            stores.notices.success(format!("「{}」を削除しました", row.name));
        }
    };

    view! {
        <PageFrame page_id="a002_menu--list" category=PageCategory::List>
            <PageHeader
                title="メニュー管理"
                subtitle=Signal::derive(move || format!("{} 件", total()))
            >
                <button
                    class="button button--primary"
                    disabled=move || restaurant_options.with(|r| r.is_empty())
                    on:click=move |_| editing.set(Some(FormTarget::New))
                >
                    {icon("plus")}
                    "メニューを追加"
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
                    placeholder="メニュー名・説明で検索"
                />
                <Select value=restaurant_id>
                    {move || options_with_all("すべてのレストラン", restaurant_options.get())}
                </Select>
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
                            <th class="table__header-cell">"画像"</th>
                            <th class="table__header-cell">"メニュー名"</th>
                            <th class="table__header-cell">"レストラン"</th>
                            <th class="table__header-cell">"カテゴリー"</th>
                            <th class="table__header-cell table__header-cell--number">"価格"</th>
                            <th class="table__header-cell table__header-cell--number">"カロリー"</th>
                            <th class="table__header-cell table__header-cell--number">"タンパク質"</th>
                            <th class="table__header-cell">"更新日"</th>
                            <th class="table__header-cell">"操作"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || rows.get()
                            key=|row| (row.id.clone(), row.name.clone(), row.image.clone(), row.price, row.calories, row.protein.to_bits(), row.available, row.updated.clone())
                            children=move |row: MenuRow| {
                                let edit_id = row.id.clone();
                                let delete_row = row.clone();
                                view! {
                                    <tr class="table__row" class:table__row--muted=!row.available>
                                        <td class="table__cell"><Thumbnail src=row.image.clone() alt=row.name.clone() /></td>
                                        <td class="table__cell">
                                            {row.name.clone()}
                                            {(!row.available).then(|| view! { <Badge>"販売休止"</Badge> })}
                                        </td>
                                        <td class="table__cell">{row.restaurant_name.clone()}</td>
                                        <td class="table__cell">{row.category.clone()}</td>
                                        <td class="table__cell table__cell--number">{format!("¥{}", row.price)}</td>
                                        <td class="table__cell table__cell--number">{format!("{} kcal", row.calories)}</td>
                                        <td class="table__cell table__cell--number">{format!("{} g", row.protein)}</td>
                                        <td class="table__cell">{row.updated.clone()}</td>
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
                    <div class="table__empty">"該当するメニューがありません"</div>
                </Show>
            </div>

            {move || editing.get().map(|target| {
                let title = match target {
                    FormTarget::New => "メニューを追加",
                    FormTarget::Edit(_) => "メニューを編集",
                };
                let preset = Some(restaurant_id.get_untracked()).filter(|id| !id.is_empty());
                let close = Callback::new(move |_| editing.set(None));
                view! {
                    <Modal title=title on_close=close wide=true>
                        <MenuDetails id=target.id() restaurant_id=preset on_saved=close on_cancel=close />
                    </Modal>
                }
            })}
        </PageFrame>
    }
}
