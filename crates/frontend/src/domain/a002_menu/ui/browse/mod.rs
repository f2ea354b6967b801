//! Public menu page: statistics, filters, sorting, favorites and the
//! per-menu nutrition analysis.

mod analysis;

use crate::shared::components::{PageHeader, StatCard, Thumbnail};
use crate::shared::icons::icon;
use crate::shared::list_utils::{options_with_all, SearchInput};
use crate::shared::modal::Modal;
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::state::use_stores;
use analysis::MenuAnalysis;
use contracts::domain::a001_restaurant::Restaurant;
use contracts::domain::a002_menu::analysis::{category_averages, MenuStatistics};
use contracts::domain::a002_menu::filter::{distinct_categories, sort_menus};
use contracts::domain::a002_menu::{
    CalorieBand, DietaryFlag, Menu, MenuFilter, MenuSort, ProteinBand,
};
use leptos::prelude::*;
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuCard {
    id: String,
    name: String,
    restaurant_name: String,
    category: String,
    image: Option<String>,
    price: u32,
    calories: u32,
    protein: f64,
    carbs: f64,
    fat: f64,
    tags: Vec<&'static str>,
    seasonal: bool,
}

impl MenuCard {
    fn new(m: &Menu, parent: Option<&Restaurant>) -> Self {
        let tags = DietaryFlag::all()
            .into_iter()
            .filter(|flag| flag.holds(m))
            .map(|flag| flag.label())
            .collect();
        Self {
            id: m.id.0.clone(),
            name: m.name.clone(),
            restaurant_name: parent.map(|r| r.name.clone()).unwrap_or_default(),
            category: m.category.clone(),
            image: m
                .image
                .src()
                .or_else(|| parent.and_then(|r| r.logo.src()))
                .map(str::to_string),
            price: m.price,
            calories: m.nutrition.calories,
            protein: m.nutrition.protein,
            carbs: m.nutrition.carbs,
            fat: m.nutrition.fat,
            tags,
            seasonal: m.seasonal,
        }
    }
}

fn band_options<T: Copy>(all: &[T], key: fn(&T) -> &'static str, label: fn(&T) -> &'static str) -> Vec<(String, String)> {
    all.iter()
        .map(|v| (key(v).to_string(), label(v).to_string()))
        .collect()
}

#[component]
#[allow(non_snake_case)]
pub fn MenuBrowse() -> impl IntoView {
    let stores = use_stores();

    let search = RwSignal::new(String::new());
    let restaurant_id = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let protein = RwSignal::new(String::new());
    let calories = RwSignal::new(String::new());
    let dietary = RwSignal::new(String::new());
    let sort = RwSignal::new(MenuSort::default().key().to_string());
    let favorites_only = RwSignal::new(false);
    let analysing = RwSignal::new(None::<String>);

    let stats = Memo::new(move |_| {
        stores
            .restaurants
            .with(|d| MenuStatistics::compute(d.restaurants(), d.menus()))
    });
    let averages = Memo::new(move |_| stores.restaurants.with(|d| category_averages(d.menus())));
    let restaurant_options = Memo::new(move |_| {
        stores.restaurants.with(|d| {
            d.restaurants()
                .iter()
                .map(|r| (r.id.0.clone(), r.name.clone()))
                .collect::<Vec<_>>()
        })
    });
    let categories = Memo::new(move |_| stores.restaurants.with(|d| distinct_categories(d.menus())));

    let cards = Memo::new(move |_| {
        let filter = MenuFilter {
            search: search.get(),
            restaurant_id: restaurant_id.get(),
            category: category.get(),
            protein: ProteinBand::from_key(&protein.get()),
            calories: CalorieBand::from_key(&calories.get()),
            dietary: DietaryFlag::from_key(&dietary.get()),
        };
        let order = MenuSort::from_key(&sort.get()).unwrap_or_default();
        let only_favorites = favorites_only.get();
        let favorites = stores.favorites.with(|f| f.ids().to_vec());

        stores.restaurants.with(|d| {
            let mut shown = filter.apply(d.menus());
            if only_favorites {
                shown.retain(|m| favorites.contains(&m.id.0));
            }
            sort_menus(&mut shown, order);
            shown
                .into_iter()
                .map(|m| MenuCard::new(m, d.parent_of(m)))
                .collect::<Vec<_>>()
        })
    });

    let reset_filters = move |_| {
        search.set(String::new());
        restaurant_id.set(String::new());
        category.set(String::new());
        protein.set(String::new());
        calories.set(String::new());
        dietary.set(String::new());
        favorites_only.set(false);
    };

    view! {
        <PageFrame page_id="a002_menu--browse" category=PageCategory::Browse>
            <PageHeader
                title="メニュー栄養検索"
                subtitle=Signal::derive(move || format!("{} 件表示", cards.with(|c| c.len())))
            />

            {move || stores.restaurants.with(|d| d.load_error().map(str::to_string)).map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="stat-grid">
                <StatCard
                    label="レストラン"
                    icon_name="restaurant"
                    value=Signal::derive(move || stats.get().restaurant_count.to_string())
                    unit="店"
                />
                <StatCard
                    label="メニュー"
                    icon_name="menu"
                    value=Signal::derive(move || stats.get().menu_count.to_string())
                    unit="品"
                />
                <StatCard
                    label="平均タンパク質"
                    icon_name="chart"
                    value=Signal::derive(move || stats.get().avg_protein.to_string())
                    unit="g"
                />
                <StatCard
                    label="平均カロリー"
                    icon_name="chart"
                    value=Signal::derive(move || stats.get().avg_calories.to_string())
                    unit="kcal"
                />
            </div>

            <div class="filter-bar filter-bar--wrap">
                <SearchInput
                    value=search
                    on_change=Callback::new(move |v| search.set(v))
                    placeholder="メニュー・レストラン名で検索"
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
                <Select value=protein>
                    {options_with_all("タンパク質", band_options(&ProteinBand::all(), ProteinBand::key, ProteinBand::label))}
                </Select>
                <Select value=calories>
                    {options_with_all("カロリー", band_options(&CalorieBand::all(), CalorieBand::key, CalorieBand::label))}
                </Select>
                <Select value=dietary>
                    {options_with_all("食事制限", band_options(&DietaryFlag::all(), DietaryFlag::key, DietaryFlag::label))}
                </Select>
                <Select value=sort>
                    {MenuSort::all().into_iter().map(|s| view! {
                        <option value=s.key()>{s.label()}</option>
                    }).collect_view()}
                </Select>
                <label class="form-check">
                    <input
                        type="checkbox"
                        prop:checked=move || favorites_only.get()
                        on:change=move |ev| favorites_only.set(event_target_checked(&ev))
                    />
                    {icon("heart")}
                    "お気に入りのみ"
                </label>
                <Button appearance=ButtonAppearance::Subtle on_click=reset_filters>
                    "条件をクリア"
                </Button>
            </div>

            <Show when=move || stores.restaurants_loading.get()>
                <div class="page__loading"><Spinner /></div>
            </Show>

            <div class="card-grid">
                <For
                    each=move || cards.get()
                    key=|c| (c.id.clone(), c.name.clone(), c.image.clone(), c.price, c.calories, c.protein.to_bits())
                    children=move |card: MenuCard| {
                        let open_id = card.id.clone();
                        let fav_id = card.id.clone();
                        let fav_check = card.id.clone();
                        let fav_name = card.name.clone();
                        let is_favorite = move || stores.favorites.with(|f| f.contains(&fav_check));
                        view! {
                            <article class="menu-card" on:click=move |_| analysing.set(Some(open_id.clone()))>
                                <div class="menu-card__image">
                                    <Thumbnail src=card.image.clone() alt=card.name.clone() />
                                </div>
                                <div class="menu-card__body">
                                    <div class="menu-card__restaurant">{card.restaurant_name.clone()}</div>
                                    <h3 class="menu-card__title">{card.name.clone()}</h3>
                                    <div class="menu-card__category">{card.category.clone()}</div>
                                    <div class="menu-card__figures">
                                        <span class="menu-card__protein">{format!("P {}g", card.protein)}</span>
                                        <span>{format!("C {}g", card.carbs)}</span>
                                        <span>{format!("F {}g", card.fat)}</span>
                                        <span>{format!("{} kcal", card.calories)}</span>
                                        <span>{format!("¥{}", card.price)}</span>
                                    </div>
                                    <div class="menu-card__tags">
                                        {card.tags.clone().into_iter().map(|t| view! { <Badge>{t}</Badge> }).collect_view()}
                                        {card.seasonal.then(|| view! { <Badge>"季節限定"</Badge> })}
                                    </div>
                                </div>
                                <button
                                    class="menu-card__favorite"
                                    class:menu-card__favorite--active=is_favorite
                                    title="お気に入り"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        stores.toggle_favorite(&fav_id, &fav_name);
                                    }
                                >
                                    {icon("heart")}
                                </button>
                            </article>
                        }
                    }
                />
            </div>
            <Show when=move || cards.with(|c| c.is_empty()) && !stores.restaurants_loading.get()>
                <div class="table__empty">"条件に合うメニューがありません"</div>
            </Show>

            <section class="category-averages">
                <h3>"カテゴリー別の平均PFC"</h3>
                <table class="table__data table--compact">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"カテゴリー"</th>
                            <th class="table__header-cell table__header-cell--number">"P"</th>
                            <th class="table__header-cell table__header-cell--number">"C"</th>
                            <th class="table__header-cell table__header-cell--number">"F"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || averages.get().into_iter().map(|a| view! {
                            <tr class="table__row">
                                <td class="table__cell">{a.category}</td>
                                <td class="table__cell table__cell--number">{format!("{}g", a.avg_protein)}</td>
                                <td class="table__cell table__cell--number">{format!("{}g", a.avg_carbs)}</td>
                                <td class="table__cell table__cell--number">{format!("{}g", a.avg_fat)}</td>
                            </tr>
                        }).collect_view()}
                    </tbody>
                </table>
            </section>

            {move || analysing.get().map(|id| {
                let close = Callback::new(move |_| analysing.set(None));
                view! {
                    <Modal title="栄養分析" on_close=close wide=true>
                        <MenuAnalysis menu_id=id />
                    </Modal>
                }
            })}
        </PageFrame>
    }
}
