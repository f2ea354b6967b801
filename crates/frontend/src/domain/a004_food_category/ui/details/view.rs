use super::view_model::CategoryDetailsViewModel;
use crate::shared::icons::icon;
use crate::shared::state::use_stores;
use contracts::domain::a004_food_category::aggregate::DEFAULT_EMOJI;
use leptos::prelude::*;

#[component]
pub fn CategoryDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = CategoryDetailsViewModel::new(use_stores());
    vm.load_if_needed(id);

    view! {
        <div class="details-container category-details">
            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-row">
                    <div class="form-group form-group--narrow">
                        <label for="category-emoji">"絵文字"</label>
                        <input
                            type="text"
                            id="category-emoji"
                            maxlength="4"
                            placeholder=DEFAULT_EMOJI
                            prop:value=move || vm.form.get().emoji
                            on:input=move |ev| vm.form.update(|f| f.emoji = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="category-name">"カテゴリー名 *"</label>
                        <input
                            type="text"
                            id="category-name"
                            placeholder="例: 肉類"
                            prop:value=move || vm.form.get().name
                            on:input=move |ev| vm.form.update(|f| f.name = event_target_value(&ev))
                        />
                    </div>
                </div>
                <div class="form-group">
                    <label for="category-description">"説明"</label>
                    <textarea
                        id="category-description"
                        rows="3"
                        prop:value=move || vm.form.get().description
                        on:input=move |ev| vm.form.update(|f| f.description = event_target_value(&ev))
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
