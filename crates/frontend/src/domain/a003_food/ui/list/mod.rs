use crate::domain::a003_food::ui::details::FoodDetails;
use crate::shared::components::PageHeader;
use crate::shared::dialogs::confirm;
use crate::shared::icons::icon;
use crate::shared::list_utils::{options_with_all, SearchInput};
use crate::shared::modal::{FormTarget, Modal};
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::state::use_stores;
use contracts::domain::a003_food::filter::{distinct_categories, sort_foods};
use contracts::domain::a003_food::{Food, FoodFilter, FoodSort};
use leptos::prelude::*;
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
pub struct FoodRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub protein_per_100g: f64,
    pub calories_per_100g: u32,
    pub serving: String,
    pub stars: String,
    pub price_range: String,
}

impl FoodRow {
    fn new(f: &Food) -> Self {
        Self {
            id: f.id.0.clone(),
            name: f.name.clone(),
            category: f.category.clone(),
            protein_per_100g: f.protein_per_100g,
            calories_per_100g: f.calories_per_100g,
            serving: if f.serving_size.is_empty() {
                String::new()
            } else {
                format!("{}（{}g）", f.serving_size, f.protein_per_serving)
            },
            stars: f.stars(),
            price_range: f.price_range.clone(),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn FoodList() -> impl IntoView {
    let stores = use_stores();
    let search = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let editing = RwSignal::new(None::<FormTarget>);

    let categories = Memo::new(move |_| stores.foods.with(|d| distinct_categories(d.foods())));

    let rows = Memo::new(move |_| {
        let filter = FoodFilter { search: search.get(), category: category.get() };
        stores.foods.with(|d| {
            let mut shown = filter.apply(d.foods());
            sort_foods(&mut shown, FoodSort::Name);
            shown.into_iter().map(FoodRow::new).collect::<Vec<_>>()
        })
    });

    let total = move || stores.foods.with(|d| d.foods().len());

    let handle_delete = move |row: FoodRow| {
        if !confirm(&format!("「{}」を削除しますか？", row.name)) {
            return;
        }
        let result = stores.with_foods(|d, now| d.delete_food(&row.id, now));
        if stores.report(result).is_some() {
            stores.notices.success(format!("「{}」を削除しました", row.name));
        }
    };

    view! {
        <PageFrame page_id="a003_food--list" category=PageCategory::List>
            <PageHeader
                title="食材管理"
                subtitle=Signal::derive(move || format!("{} 件", total()))
            >
                <button class="button button--primary" on:click=move |_| editing.set(Some(FormTarget::New))>
                    {icon("plus")}
                    "食材を追加"
                </button>
            </PageHeader>

            {move || stores.foods.with(|d| d.load_error().map(str::to_string)).map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="filter-bar">
                <SearchInput
                    value=search
                    on_change=Callback::new(move |v| search.set(v))
                    placeholder="食材名・説明で検索"
                />
                <Select value=category>
                    {move || options_with_all(
                        "すべてのカテゴリー",
                        categories.get().into_iter().map(|c| (c.clone(), c)).collect(),
                    )}
                </Select>
            </div>

            <Show when=move || stores.foods_loading.get()>
                <div class="page__loading"><Spinner /></div>
            </Show>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"食材名"</th>
                            <th class="table__header-cell">"カテゴリー"</th>
                            <th class="table__header-cell table__header-cell--number">"タンパク質/100g"</th>
                            <th class="table__header-cell table__header-cell--number">"カロリー/100g"</th>
                            <th class="table__header-cell">"1食あたり"</th>
                            <th class="table__header-cell">"おすすめ度"</th>
                            <th class="table__header-cell">"価格帯"</th>
                            <th class="table__header-cell">"操作"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || rows.get()
                            key=|row| (row.id.clone(), row.name.clone(), row.protein_per_100g.to_bits(), row.stars.clone(), row.serving.clone())
                            children=move |row: FoodRow| {
                                let edit_id = row.id.clone();
                                let delete_row = row.clone();
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{row.name.clone()}</td>
                                        <td class="table__cell">{row.category.clone()}</td>
                                        <td class="table__cell table__cell--number">{format!("{} g", row.protein_per_100g)}</td>
                                        <td class="table__cell table__cell--number">{format!("{} kcal", row.calories_per_100g)}</td>
                                        <td class="table__cell">{row.serving.clone()}</td>
                                        <td class="table__cell">{row.stars.clone()}</td>
                                        <td class="table__cell">{row.price_range.clone()}</td>
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
                <Show when=move || rows.with(|r| r.is_empty()) && !stores.foods_loading.get()>
                    <div class="table__empty">"該当する食材がありません"</div>
                </Show>
            </div>

            {move || editing.get().map(|target| {
                let title = match target {
                    FormTarget::New => "食材を追加",
                    FormTarget::Edit(_) => "食材を編集",
                };
                let close = Callback::new(move |_| editing.set(None));
                view! {
                    <Modal title=title on_close=close wide=true>
                        <FoodDetails id=target.id() on_saved=close on_cancel=close />
                    </Modal>
                }
            })}
        </PageFrame>
    }
}
