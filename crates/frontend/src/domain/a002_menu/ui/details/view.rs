use super::view_model::MenuDetailsViewModel;
use crate::shared::components::ImageField;
use crate::shared::icons::icon;
use crate::shared::state::use_stores;
use contracts::domain::a002_menu::nutrition::MICRO_FIELDS;
use contracts::domain::a002_menu::MenuDto;
use leptos::prelude::*;

/// Text input bound to one string field of the form
fn text_field(
    vm: MenuDetailsViewModel,
    label: &'static str,
    input_type: &'static str,
    get: fn(&MenuDto) -> String,
    set: fn(&mut MenuDto, String),
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <input
                type=input_type
                prop:value=move || vm.form.with(get)
                on:input=move |ev| vm.form.update(|f| set(f, event_target_value(&ev)))
            />
        </div>
    }
}

/// Checkbox bound to one flag of the form
fn flag_field(
    vm: MenuDetailsViewModel,
    label: &'static str,
    get: fn(&MenuDto) -> bool,
    set: fn(&mut MenuDto, bool),
) -> impl IntoView {
    view! {
        <label class="form-check">
            <input
                type="checkbox"
                prop:checked=move || vm.form.with(get)
                on:change=move |ev| vm.form.update(|f| set(f, event_target_checked(&ev)))
            />
            {label}
        </label>
    }
}

#[component]
pub fn MenuDetails(
    id: Option<String>,
    /// Preselected restaurant for a new menu
    restaurant_id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = MenuDetailsViewModel::new(use_stores());
    vm.load_if_needed(id, restaurant_id);

    view! {
        <div class="details-container menu-details">
            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="restaurant">"レストラン *"</label>
                    <select
                        id="restaurant"
                        prop:value=move || vm.form.get().restaurant_id
                        on:change=move |ev| vm.form.update(|f| f.restaurant_id = event_target_value(&ev))
                    >
                        <option value="">"選択してください"</option>
                        {move || vm.restaurant_options().into_iter().map(|(id, name)| {
                            let selected = vm.form.with_untracked(|f| f.restaurant_id == id);
                            view! { <option value=id selected=selected>{name}</option> }
                        }).collect_view()}
                    </select>
                </div>

                {text_field(vm, "メニュー名 *", "text", |f| f.name.clone(), |f, v| f.name = v)}
                {text_field(vm, "カテゴリー", "text", |f| f.category.clone(), |f, v| f.category = v)}

                <div class="form-group">
                    <label for="menu-description">"説明"</label>
                    <textarea
                        id="menu-description"
                        rows="2"
                        prop:value=move || vm.form.get().description
                        on:input=move |ev| vm.form.update(|f| f.description = event_target_value(&ev))
                    />
                </div>

                <div class="form-row">
                    {text_field(vm, "価格（円）", "number", |f| f.price.clone(), |f, v| f.price = v)}
                    {text_field(vm, "サイズ", "text", |f| f.size.clone(), |f, v| f.size = v)}
                </div>

                <ImageField
                    label="画像"
                    url=Signal::derive(move || vm.form.get().image_url)
                    upload=Signal::derive(move || vm.form.get().image_upload)
                    on_url=Callback::new(move |v| vm.form.update(|f| f.image_url = v))
                    on_upload=Callback::new(move |v| vm.form.update(|f| f.image_upload = v))
                />

                <fieldset class="form-section">
                    <legend>"栄養成分"</legend>
                    <div class="form-row">
                        {text_field(vm, "カロリー（kcal）", "number", |f| f.calories.clone(), |f, v| f.calories = v)}
                        {text_field(vm, "タンパク質（g）", "number", |f| f.protein.clone(), |f, v| f.protein = v)}
                        {text_field(vm, "炭水化物（g）", "number", |f| f.carbs.clone(), |f, v| f.carbs = v)}
                    </div>
                    <div class="form-row">
                        {text_field(vm, "脂質（g）", "number", |f| f.fat.clone(), |f, v| f.fat = v)}
                        {text_field(vm, "食物繊維（g）", "number", |f| f.fiber.clone(), |f, v| f.fiber = v)}
                        {text_field(vm, "ナトリウム（mg）", "number", |f| f.sodium.clone(), |f, v| f.sodium = v)}
                    </div>

                    <button
                        class="button button--link"
                        on:click=move |_| vm.show_micro.update(|v| *v = !*v)
                    >
                        {move || if vm.show_micro.get() { icon("chevron-down") } else { icon("chevron-right") }}
                        "詳細な栄養成分"
                    </button>
                    <Show when=move || vm.show_micro.get()>
                        <div class="form-grid">
                            {MICRO_FIELDS.iter().map(|&(key, label, unit)| {
                                let value = vm.micro_value(key);
                                view! {
                                    <div class="form-group">
                                        <label>{format!("{}（{}）", label, unit)}</label>
                                        <input
                                            type="number"
                                            step="any"
                                            prop:value=move || value()
                                            on:input=move |ev| vm.set_micro(key, event_target_value(&ev))
                                        />
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    </Show>
                </fieldset>

                {text_field(vm, "アレルゲン（カンマ区切り）", "text", |f| f.allergens.clone(), |f, v| f.allergens = v)}

                <div class="form-flags">
                    {flag_field(vm, "ベジタリアン", |f| f.is_vegetarian, |f, v| f.is_vegetarian = v)}
                    {flag_field(vm, "ヴィーガン", |f| f.is_vegan, |f, v| f.is_vegan = v)}
                    {flag_field(vm, "グルテンフリー", |f| f.is_gluten_free, |f, v| f.is_gluten_free = v)}
                    {flag_field(vm, "販売中", |f| f.available, |f, v| f.available = v)}
                    {flag_field(vm, "季節限定", |f| f.seasonal, |f, v| f.seasonal = v)}
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
