use crate::shared::components::{ProgressBar, Thumbnail};
use crate::shared::state::use_stores;
use contracts::domain::a002_menu::analysis::{daily_value_rows, round1, PfcBreakdown};
use contracts::domain::a002_menu::Menu;
use leptos::prelude::*;

/// Nutrition breakdown of a single menu
#[component]
pub fn MenuAnalysis(menu_id: String) -> impl IntoView {
    let stores = use_stores();
    let found = stores.restaurants.with_untracked(|d| {
        d.menu(&menu_id).map(|m| {
            let parent = d.parent_of(m);
            (
                m.clone(),
                parent.map(|r| r.name.clone()).unwrap_or_default(),
                m.image.src().or_else(|| parent.and_then(|r| r.logo.src())).map(str::to_string),
            )
        })
    });

    let Some((menu, restaurant_name, image)) = found else {
        return view! { <div class="warning-box">"メニューが見つかりません"</div> }.into_any();
    };

    view! {
        <div class="analysis">
            <div class="analysis__header">
                <Thumbnail src=image alt=menu.name.clone() />
                <div>
                    <h3 class="analysis__title">{menu.name.clone()}</h3>
                    <div class="analysis__meta">
                        {restaurant_name}
                        " ・ "
                        {format!("¥{}", menu.price)}
                        {(!menu.size.is_empty()).then(|| format!(" ・ {}", menu.size))}
                    </div>
                </div>
            </div>

            {pfc_section(&menu)}
            {daily_value_section(&menu)}

            {(!menu.allergens.is_empty()).then(|| view! {
                <div class="analysis__allergens">
                    <strong>"アレルゲン: "</strong>
                    {menu.allergens.join("、")}
                </div>
            })}
        </div>
    }
    .into_any()
}

fn pfc_section(menu: &Menu) -> impl IntoView {
    let pfc = PfcBreakdown::of(&menu.nutrition);
    let (p, c, f) = pfc.percentages();
    let n = &menu.nutrition;
    let bars = [
        ("タンパク質", n.protein, pfc.protein_kcal, p, "pfc--protein"),
        ("炭水化物", n.carbs, pfc.carbs_kcal, c, "pfc--carbs"),
        ("脂質", n.fat, pfc.fat_kcal, f, "pfc--fat"),
    ];

    view! {
        <section class="analysis__section">
            <h4>"PFCバランス"</h4>
            {if pfc.total() <= 0.0 {
                view! { <p class="analysis__empty">"栄養成分が登録されていません"</p> }.into_any()
            } else {
                bars.into_iter().map(|(label, grams, kcal, percent, class)| view! {
                    <div class="pfc-row">
                        <span class="pfc-row__label">{label}</span>
                        <ProgressBar percent=Signal::stored(percent) class=class />
                        <span class="pfc-row__value">
                            {format!("{}g / {}kcal ({}%)", grams, round1(kcal), percent)}
                        </span>
                    </div>
                }).collect_view().into_any()
            }}
        </section>
    }
}

fn daily_value_section(menu: &Menu) -> impl IntoView {
    let rows = daily_value_rows(&menu.nutrition);
    view! {
        <section class="analysis__section">
            <h4>"1日の推奨量に対する割合"</h4>
            <table class="table__data table--compact">
                <tbody>
                    {rows.into_iter().map(|row| view! {
                        <tr class="table__row" class:table__row--over={row.percent > 100.0}>
                            <td class="table__cell">{row.label}</td>
                            <td class="table__cell table__cell--number">
                                {format!("{}{}", round1(row.amount), row.unit)}
                            </td>
                            <td class="table__cell dv-bar">
                                <ProgressBar percent=Signal::stored(row.percent) />
                            </td>
                            <td class="table__cell table__cell--number">{format!("{}%", row.percent)}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        </section>
    }
}
