use crate::domain::a004_food_category::ui::details::CategoryDetails;
use crate::shared::components::PageHeader;
use crate::shared::dialogs::confirm;
use crate::shared::icons::icon;
use crate::shared::modal::{FormTarget, Modal};
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::state::use_stores;
use contracts::domain::a004_food_category::Category;
use leptos::prelude::*;
use thaw::*;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CategoryRow {
    pub id: String,
    pub emoji: String,
    pub name: String,
    pub description: String,
    /// Foods whose category text equals this name
    pub food_count: usize,
}

impl CategoryRow {
    fn new(c: &Category, food_count: usize) -> Self {
        Self {
            id: c.id.0.clone(),
            emoji: c.emoji.clone(),
            name: c.name.clone(),
            description: c.description.clone(),
            food_count,
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn CategoryList() -> impl IntoView {
    let stores = use_stores();
    let editing = RwSignal::new(None::<FormTarget>);

    let rows = Memo::new(move |_| {
        stores.foods.with(|d| {
            d.categories()
                .iter()
                .map(|c| {
                    let count = d.foods().iter().filter(|f| f.category == c.name).count();
                    CategoryRow::new(c, count)
                })
                .collect::<Vec<_>>()
        })
    });

    let handle_delete = move |row: CategoryRow| {
        let message = if row.food_count > 0 {
            format!(
                "カテゴリー「{}」を削除しますか？\n食材 {} 件のカテゴリー表記はそのまま残ります。",
                row.name, row.food_count
            )
        } else {
            format!("カテゴリー「{}」を削除しますか？", row.name)
        };
        if !confirm(&message) {
            return;
        }
        let result = stores.with_foods(|d, _| d.delete_category(&row.id));
        if stores.report(result).is_some() {
            stores.notices.success(format!("カテゴリー「{}」を削除しました", row.name));
        }
    };

    view! {
        <PageFrame page_id="a004_food_category--list" category=PageCategory::List>
            <PageHeader
                title="食材カテゴリー"
                subtitle=Signal::derive(move || format!("{} 件", rows.with(|r| r.len())))
            >
                <button class="button button--primary" on:click=move |_| editing.set(Some(FormTarget::New))>
                    {icon("plus")}
                    "カテゴリーを追加"
                </button>
            </PageHeader>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell"></th>
                            <th class="table__header-cell">"カテゴリー名"</th>
                            <th class="table__header-cell">"説明"</th>
                            <th class="table__header-cell table__header-cell--number">"食材数"</th>
                            <th class="table__header-cell">"操作"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || rows.get()
                            key=|row| row.clone()
                            children=move |row: CategoryRow| {
                                let edit_id = row.id.clone();
                                let delete_row = row.clone();
                                view! {
                                    <tr class="table__row">
                                        <td class="table__cell table__cell--emoji">{row.emoji.clone()}</td>
                                        <td class="table__cell">{row.name.clone()}</td>
                                        <td class="table__cell">{row.description.clone()}</td>
                                        <td class="table__cell table__cell--number">{row.food_count}</td>
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
                <Show when=move || rows.with(|r| r.is_empty())>
                    <div class="table__empty">"カテゴリーが登録されていません"</div>
                </Show>
            </div>

            {move || editing.get().map(|target| {
                let title = match target {
                    FormTarget::New => "カテゴリーを追加",
                    FormTarget::Edit(_) => "カテゴリーを編集",
                };
                let close = Callback::new(move |_| editing.set(None));
                view! {
                    <Modal title=title on_close=close>
                        <CategoryDetails id=target.id() on_saved=close on_cancel=close />
                    </Modal>
                }
            })}
        </PageFrame>
    }
}
