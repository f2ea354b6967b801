use super::view_model::PlannerViewModel;
use crate::shared::components::{PageHeader, ProgressBar, StatCard};
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::modal::Modal;
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::state::use_stores;
use contracts::domain::a002_menu::analysis::round1;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u502_meal_planner::{MealPlanner, MealSlot, PlanItem, PlanTemplate, Preset};
use leptos::prelude::*;
use thaw::*;

fn plan_line(vm: PlannerViewModel, slot: MealSlot, item: PlanItem) -> impl IntoView {
    let id = item.id.0.clone();
    let dec_id = id.clone();
    let inc_id = id.clone();
    let input_id = id.clone();
    let quantity = item.quantity as i64;

    view! {
        <li class="plan-line">
            <div class="plan-line__name">
                {item.name.clone()}
                <span class="plan-line__serving">{item.serving_label()}</span>
            </div>
            <div class="plan-line__quantity">
                <button class="button button--icon" on:click=move |_| vm.set_quantity(slot, &dec_id, quantity - 1)>"−"</button>
                <input
                    type="number"
                    min="0"
                    class="plan-line__input"
                    prop:value=item.quantity.to_string()
                    on:change=move |ev| {
                        let q = event_target_value(&ev).trim().parse::<i64>().unwrap_or(0);
                        vm.set_quantity(slot, &input_id, q);
                    }
                />
                <button class="button button--icon" on:click=move |_| vm.set_quantity(slot, &inc_id, quantity + 1)>"+"</button>
            </div>
            <div class="plan-line__protein">{format!("{}g", round1(item.protein()))}</div>
            <button class="button button--icon" title="削除" on:click=move |_| vm.remove(slot, &id)>
                {icon("x")}
            </button>
        </li>
    }
}

fn slot_panel(vm: PlannerViewModel, slot: MealSlot) -> impl IntoView {
    let slot_target = move || vm.plan.with(|p| p.meal_targets().get(slot));
    let slot_protein = move || vm.plan.with(|p| p.slot_protein(slot));
    let progress = Signal::derive(move || {
        vm.plan.with(|p| {
            p.summary()
                .slot_progress
                .iter()
                .find(|(s, _)| *s == slot)
                .map(|(_, pct)| *pct)
                .unwrap_or(0.0)
        })
    });

    view! {
        <section class="meal-slot">
            <header class="meal-slot__header">
                <h3>{slot.label()}</h3>
                <span class="meal-slot__figures">
                    {move || format!("{}g / 目標 {}g", round1(slot_protein()), slot_target())}
                </span>
            </header>
            <ProgressBar percent=progress class="meal-slot__progress" />
            <ul class="meal-slot__items">
                {move || vm.plan.with(|p| p.items(slot).to_vec()).into_iter()
                    .map(|item| plan_line(vm, slot, item))
                    .collect_view()}
            </ul>
            <Show when=move || vm.plan.with(|p| p.items(slot).is_empty())>
                <div class="meal-slot__empty">"食材が追加されていません"</div>
            </Show>
            <button class="button button--link" on:click=move |_| vm.picker.set(Some(slot))>
                {icon("plus")}
                "食材を追加"
            </button>
        </section>
    }
}

fn template_card(vm: PlannerViewModel, template: &'static PlanTemplate) -> impl IntoView {
    let protein = move || template.protein(&vm.catalog());
    view! {
        <article class="template-card">
            <header>
                <h4 class="template-card__title">{template.name}</h4>
                <div class="template-card__subtitle">{template.subtitle}</div>
            </header>
            <p class="template-card__description">{template.description}</p>
            <div class="template-card__figures">
                <span>{format!("目標 {}g", template.target_protein)}</span>
                <span>{move || format!("合計 約{}g", protein())}</span>
                <span>{format!("難易度 {}", template.difficulty)}</span>
                <span>{format!("調理 {}", template.time)}</span>
            </div>
            <div class="template-card__tags">
                {template.tags.iter().map(|t| view! { <Badge>{*t}</Badge> }).collect_view()}
            </div>
            <details class="template-card__items">
                <summary>"内容"</summary>
                {MealSlot::all().into_iter().map(|slot| view! {
                    <div class="template-card__slot">
                        <strong>{slot.label()}</strong>
                        {template.items_for(slot)
                            .map(|it| format!("{}（{}×{}）", it.food_id, it.serving_weight, it.quantity))
                            .collect::<Vec<_>>()
                            .join("、")}
                    </div>
                }).collect_view()}
            </details>
            <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.apply_template(template)>
                "このテンプレートを使う"
            </Button>
        </article>
    }
}

#[component]
fn FoodPicker(vm: PlannerViewModel, slot: MealSlot) -> impl IntoView {
    let foods = Memo::new(move |_| vm.picker_foods());
    view! {
        <div class="food-picker">
            <SearchInput
                value=vm.picker_search
                on_change=Callback::new(move |v| vm.picker_search.set(v))
                placeholder="食材名で検索"
            />
            <ul class="food-picker__list">
                {move || foods.get().into_iter().map(|food| {
                    let label = format!("{}（{}）", food.name, food.serving_size);
                    let protein = format!("{}g", food.protein_per_serving);
                    view! {
                        <li class="food-picker__item" on:click=move |_| vm.add_food(slot, &food)>
                            <span>{label}</span>
                            <span class="food-picker__protein">{protein}</span>
                        </li>
                    }
                }).collect_view()}
            </ul>
            <Show when=move || foods.with(|f| f.is_empty())>
                <div class="table__empty">"食材がありません"</div>
            </Show>
        </div>
    }
}

#[component]
pub fn MealPlannerPage() -> impl IntoView {
    let stores = use_stores();
    let vm = PlannerViewModel::new(stores);
    let summary = Memo::new(move |_| vm.plan.with(|p| p.summary()));

    view! {
        <PageFrame page_id="u502_meal_planner--usecase" category=PageCategory::UseCase>
            <PageHeader title=MealPlanner::display_name() subtitle=MealPlanner::description().to_string()>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.save()>
                    {icon("save")}
                    "保存"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.load()>
                    {icon("refresh")}
                    "読み込み"
                </Button>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.reset()>
                    "リセット"
                </Button>
            </PageHeader>

            <div class="planner-target">
                <label for="planner-target">"1日の目標タンパク質（g）"</label>
                <input
                    id="planner-target"
                    type="number"
                    min="1"
                    prop:value=move || vm.target_input.get()
                    on:input=move |ev| vm.target_input.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            vm.apply_target();
                        }
                    }
                />
                <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.apply_target()>
                    "設定"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.auto_distribute()>
                    "自動配分"
                </Button>
                <span class="planner-target__split">
                    {move || {
                        let t = vm.plan.with(|p| p.meal_targets());
                        format!("朝 {}g ・ 昼 {}g ・ 夕 {}g", t.breakfast, t.lunch, t.dinner)
                    }}
                </span>
            </div>

            <div class="stat-grid">
                <StatCard
                    label="合計タンパク質"
                    icon_name="chart"
                    value=Signal::derive(move || round1(summary.get().total_protein).to_string())
                    unit="g"
                />
                <StatCard
                    label="達成率"
                    icon_name="chart"
                    value=Signal::derive(move || summary.get().achievement_percent.to_string())
                    unit="%"
                />
                <StatCard
                    label="残り"
                    icon_name="chart"
                    value=Signal::derive(move || round1(summary.get().remaining).to_string())
                    unit="g"
                />
            </div>
            <ProgressBar
                percent=Signal::derive(move || summary.get().achievement_percent as f64)
                class="planner-total"
            />

            <div class="planner-presets">
                <span>"クイックプリセット:"</span>
                {Preset::all().into_iter().map(|preset| view! {
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.apply_preset(preset)>
                        {preset.label()}
                    </Button>
                }).collect_view()}
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.clear()>
                    "すべてクリア"
                </Button>
            </div>

            <Show when=move || stores.foods_loading.get()>
                <div class="page__loading"><Spinner /></div>
            </Show>

            <div class="meal-slots">
                {MealSlot::all().into_iter().map(|slot| slot_panel(vm, slot)).collect_view()}
            </div>

            <section class="planner-templates">
                <h3>"プランテンプレート"</h3>
                <div class="card-grid">
                    {PlanTemplate::all().iter().map(|t| template_card(vm, t)).collect_view()}
                </div>
            </section>

            {move || vm.picker.get().map(|slot| {
                let close = Callback::new(move |_| {
                    vm.picker.set(None);
                    vm.picker_search.set(String::new());
                });
                view! {
                    <Modal title=format!("{}に食材を追加", slot.label()) on_close=close>
                        {FoodPicker(FoodPickerProps { vm, slot })}
                    </Modal>
                }
            })}
        </PageFrame>
    }
}
