use super::view_model::{FoodDetailsViewModel, NutrientList};
use crate::shared::icons::icon;
use crate::shared::state::use_stores;
use contracts::domain::a003_food::aggregate::PRICE_RANGES;
use contracts::domain::a003_food::FoodDto;
use leptos::prelude::*;

fn text_field(
    vm: FoodDetailsViewModel,
    label: &'static str,
    input_type: &'static str,
    get: fn(&FoodDto) -> String,
    set: fn(&mut FoodDto, String),
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <input
                type=input_type
                step="any"
                prop:value=move || vm.form.with(get)
                on:input=move |ev| vm.form.update(|f| set(f, event_target_value(&ev)))
            />
        </div>
    }
}

fn nutrient_lines(vm: FoodDetailsViewModel, list: NutrientList) -> impl IntoView {
    let lines = move || {
        vm.form.with(|f| match list {
            NutrientList::Vitamins => f.vitamins.clone(),
            NutrientList::Minerals => f.minerals.clone(),
        })
    };

    view! {
        <fieldset class="form-section">
            <legend>{list.label()}</legend>
            {move || lines().into_iter().enumerate().map(|(index, line)| view! {
                <div class="form-row nutrient-line">
                    <input
                        type="text"
                        placeholder="名前（例: ビタミンB6）"
                        prop:value=line.name
                        on:change=move |ev| vm.set_nutrient(list, index, Some(event_target_value(&ev)), None)
                    />
                    <input
                        type="text"
                        placeholder="量（例: 0.6mg）"
                        prop:value=line.amount
                        on:change=move |ev| vm.set_nutrient(list, index, None, Some(event_target_value(&ev)))
                    />
                    <button class="button button--icon" title="削除" on:click=move |_| vm.remove_nutrient(list, index)>
                        {icon("x")}
                    </button>
                </div>
            }).collect_view()}
            <button class="button button--link" on:click=move |_| vm.add_nutrient(list)>
                {icon("plus")}
                {format!("{}を追加", list.label())}
            </button>
        </fieldset>
    }
}

#[component]
pub fn FoodDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = FoodDetailsViewModel::new(use_stores());
    vm.load_if_needed(id);

    view! {
        <div class="details-container food-details">
            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                {text_field(vm, "食材名 *", "text", |f| f.name.clone(), |f, v| f.name = v)}

                <div class="form-group">
                    <label for="food-category">"カテゴリー"</label>
                    <input
                        type="text"
                        id="food-category"
                        list="food-category-options"
                        prop:value=move || vm.form.get().category
                        on:input=move |ev| vm.form.update(|f| f.category = event_target_value(&ev))
                    />
                    <datalist id="food-category-options">
                        {move || vm.category_options().into_iter().map(|name| view! {
                            <option value=name></option>
                        }).collect_view()}
                    </datalist>
                </div>

                <div class="form-group">
                    <label for="food-description">"説明"</label>
                    <textarea
                        id="food-description"
                        rows="2"
                        prop:value=move || vm.form.get().description
                        on:input=move |ev| vm.form.update(|f| f.description = event_target_value(&ev))
                    />
                </div>

                <fieldset class="form-section">
                    <legend>"100gあたり"</legend>
                    <div class="form-row">
                        {text_field(vm, "タンパク質（g）", "number", |f| f.protein_per_100g.clone(), |f, v| f.protein_per_100g = v)}
                        {text_field(vm, "炭水化物（g）", "number", |f| f.carbs_per_100g.clone(), |f, v| f.carbs_per_100g = v)}
                        {text_field(vm, "脂質（g）", "number", |f| f.fat_per_100g.clone(), |f, v| f.fat_per_100g = v)}
                        {text_field(vm, "カロリー（kcal）", "number", |f| f.calories_per_100g.clone(), |f, v| f.calories_per_100g = v)}
                    </div>
                </fieldset>

                <div class="form-row">
                    {text_field(vm, "1食の量", "text", |f| f.serving_size.clone(), |f, v| f.serving_size = v)}
                    {text_field(vm, "1食あたりタンパク質（g）", "number", |f| f.protein_per_serving.clone(), |f, v| f.protein_per_serving = v)}
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="food-rating">"おすすめ度"</label>
                        <select
                            id="food-rating"
                            prop:value=move || vm.form.get().rating
                            on:change=move |ev| vm.form.update(|f| f.rating = event_target_value(&ev))
                        >
                            {(1..=5u32).map(|r| view! {
                                <option value=r.to_string()>{"★".repeat(r as usize)}</option>
                            }).collect_view()}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="food-price">"価格帯"</label>
                        <select
                            id="food-price"
                            prop:value=move || vm.form.get().price_range
                            on:change=move |ev| vm.form.update(|f| f.price_range = event_target_value(&ev))
                        >
                            {PRICE_RANGES.iter().map(|p| view! { <option value=*p>{*p}</option> }).collect_view()}
                        </select>
                    </div>
                </div>

                {nutrient_lines(vm, NutrientList::Vitamins)}
                {nutrient_lines(vm, NutrientList::Minerals)}

                <div class="form-group">
                    <label for="food-benefits">"健康効果（1行に1つ）"</label>
                    <textarea
                        id="food-benefits"
                        rows="3"
                        prop:value=move || vm.form.get().benefits
                        on:input=move |ev| vm.form.update(|f| f.benefits = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="food-tips">"調理のコツ（1行に1つ）"</label>
                    <textarea
                        id="food-tips"
                        rows="3"
                        prop:value=move || vm.form.get().cooking_tips
                        on:input=move |ev| vm.form.update(|f| f.cooking_tips = event_target_value(&ev))
                    />
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| vm.save_command(on_saved)
                    disabled=move || !vm.is_form_valid()()
                >
                    {icon("save")}
                    {move || if vm.is_edit_mode()() { "保存" } else { "追加" }}
                </button>
                <button class="btn btn-secondary" on:click=move |_| on_cancel.run(())>
                    {icon("x")}
                    "キャンセル"
                </button>
            </div>
        </div>
    }
}
