//! Public recommended-foods page with an expandable detail per card.

use crate::shared::components::PageHeader;
use crate::shared::icons::icon;
use crate::shared::list_utils::{options_with_all, SearchInput};
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::state::use_stores;
use contracts::domain::a003_food::aggregate::PRICE_RANGES;
use contracts::domain::a003_food::filter::{distinct_categories, sort_foods};
use contracts::domain::a003_food::{Food, FoodSort, RecommendedFilter};
use leptos::prelude::*;
use thaw::*;

#[component]
fn FoodCard(food: Food, #[prop(into)] emoji: String) -> impl IntoView {
    let expanded = RwSignal::new(false);
    let has_details = !(food.vitamins.is_empty()
        && food.minerals.is_empty()
        && food.benefits.is_empty()
        && food.cooking_tips.is_empty());

    let vitamins = food.vitamins.clone();
    let minerals = food.minerals.clone();
    let benefits = food.benefits.clone();
    let tips = food.cooking_tips.clone();

    view! {
        <article class="food-card">
            <header class="food-card__header">
                <span class="food-card__emoji">{emoji}</span>
                <div>
                    <h3 class="food-card__title">{food.name.clone()}</h3>
                    <div class="food-card__category">{food.category.clone()}</div>
                </div>
                <div class="food-card__rating" title="おすすめ度">{food.stars()}</div>
            </header>
            <p class="food-card__description">{food.description.clone()}</p>
            <div class="food-card__figures">
                <span class="food-card__protein">{format!("タンパク質 {}g/100g", food.protein_per_100g)}</span>
                <span>{format!("C {}g", food.carbs_per_100g)}</span>
                <span>{format!("F {}g", food.fat_per_100g)}</span>
                <span>{format!("{} kcal", food.calories_per_100g)}</span>
            </div>
            {(!food.serving_size.is_empty()).then(|| view! {
                <div class="food-card__serving">
                    {format!("1食（{}）あたり タンパク質 {}g", food.serving_size, food.protein_per_serving)}
                </div>
            })}
            <div class="food-card__tags">
                <Badge>{food.price_range.clone()}</Badge>
            </div>

            <Show when=move || has_details>
                <button class="button button--link" on:click=move |_| expanded.update(|v| *v = !*v)>
                    {move || if expanded.get() { icon("chevron-down") } else { icon("chevron-right") }}
                    "詳細"
                </button>
            </Show>
            <Show when=move || expanded.get()>
                <div class="food-card__details">
                    {(!vitamins.is_empty()).then(|| view! {
                        <h4>"ビタミン"</h4>
                        <ul>
                            {vitamins.iter().map(|v| view! { <li>{format!("{} {}", v.name, v.amount)}</li> }).collect_view()}
                        </ul>
                    })}
                    {(!minerals.is_empty()).then(|| view! {
                        <h4>"ミネラル"</h4>
                        <ul>
                            {minerals.iter().map(|m| view! { <li>{format!("{} {}", m.name, m.amount)}</li> }).collect_view()}
                        </ul>
                    })}
                    {(!benefits.is_empty()).then(|| view! {
                        <h4>"健康効果"</h4>
                        <ul>{benefits.iter().map(|b| view! { <li>{b.clone()}</li> }).collect_view()}</ul>
                    })}
                    {(!tips.is_empty()).then(|| view! {
                        <h4>"調理のコツ"</h4>
                        <ul>{tips.iter().map(|t| view! { <li>{t.clone()}</li> }).collect_view()}</ul>
                    })}
                </div>
            </Show>
        </article>
    }
}

#[component]
#[allow(non_snake_case)]
pub fn FoodBrowse() -> impl IntoView {
    let stores = use_stores();
    let search = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let price_range = RwSignal::new(String::new());
    let min_rating = RwSignal::new(String::new());
    let sort = RwSignal::new(FoodSort::default().key().to_string());

    let categories = Memo::new(move |_| stores.foods.with(|d| distinct_categories(d.foods())));

    let foods = Memo::new(move |_| {
        let filter = RecommendedFilter {
            search: search.get(),
            category: category.get(),
            price_range: price_range.get(),
            min_rating: min_rating.get().parse().ok(),
        };
        let order = FoodSort::from_key(&sort.get()).unwrap_or_default();
        stores.foods.with(|d| {
            let mut shown = filter.apply(d.foods());
            sort_foods(&mut shown, order);
            shown
                .into_iter()
                .map(|f| {
                    let emoji = d
                        .categories()
                        .iter()
                        .find(|c| c.name == f.category)
                        .map(|c| c.emoji.clone())
                        .unwrap_or_default();
                    (f.clone(), emoji)
                })
                .collect::<Vec<_>>()
        })
    });

    view! {
        <PageFrame page_id="a003_food--browse" category=PageCategory::Browse>
            <PageHeader
                title="おすすめ高タンパク食材"
                subtitle=Signal::derive(move || format!("{} 件表示", foods.with(|f| f.len())))
            />

            {move || stores.foods.with(|d| d.load_error().map(str::to_string)).map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="filter-bar filter-bar--wrap">
                <SearchInput
                    value=search
                    on_change=Callback::new(move |v| search.set(v))
                    placeholder="食材名で検索"
                />
                <Select value=category>
                    {move || options_with_all(
                        "すべてのカテゴリー",
                        categories.get().into_iter().map(|c| (c.clone(), c)).collect(),
                    )}
                </Select>
                <Select value=price_range>
                    {options_with_all(
                        "すべての価格帯",
                        PRICE_RANGES.iter().map(|p| (p.to_string(), p.to_string())).collect(),
                    )}
                </Select>
                <Select value=min_rating>
                    {options_with_all(
                        "おすすめ度",
                        (1..=5u32).rev().map(|r| (r.to_string(), format!("{}以上", "⭐".repeat(r as usize)))).collect(),
                    )}
                </Select>
                <Select value=sort>
                    {FoodSort::all().into_iter().map(|s| view! {
                        <option value=s.key()>{s.label()}</option>
                    }).collect_view()}
                </Select>
            </div>

            <Show when=move || stores.foods_loading.get()>
                <div class="page__loading"><Spinner /></div>
            </Show>

            <div class="card-grid">
                {move || foods.get().into_iter().map(|(food, emoji)| view! {
                    <FoodCard food=food emoji=emoji />
                }).collect_view()}
            </div>
            <Show when=move || foods.with(|f| f.is_empty()) && !stores.foods_loading.get()>
                <div class="table__empty">"条件に合う食材がありません"</div>
            </Show>
        </PageFrame>
    }
}
