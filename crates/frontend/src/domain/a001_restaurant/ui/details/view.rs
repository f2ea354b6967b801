use super::view_model::RestaurantDetailsViewModel;
use crate::shared::components::ImageField;
use crate::shared::icons::icon;
use crate::shared::state::use_stores;
use leptos::prelude::*;

#[component]
pub fn RestaurantDetails(
    id: Option<String>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = RestaurantDetailsViewModel::new(use_stores());
    vm.load_if_needed(id);

    view! {
        <div class="details-container restaurant-details">
            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form">
                <div class="form-group">
                    <label for="name">"レストラン名 *"</label>
                    <input
                        type="text"
                        id="name"
                        prop:value=move || vm.form.get().name
                        on:input=move |ev| vm.form.update(|f| f.name = event_target_value(&ev))
                        placeholder="例: 吉野家"
                    />
                </div>

                <div class="form-group">
                    <label for="category">"カテゴリー"</label>
                    <input
                        type="text"
                        id="category"
                        prop:value=move || vm.form.get().category
                        on:input=move |ev| vm.form.update(|f| f.category = event_target_value(&ev))
                        placeholder="例: 牛丼"
                    />
                </div>

                <div class="form-group">
                    <label for="description">"説明"</label>
                    <textarea
                        id="description"
                        rows="3"
                        prop:value=move || vm.form.get().description
                        on:input=move |ev| vm.form.update(|f| f.description = event_target_value(&ev))
                    />
                </div>

                <ImageField
                    label="ロゴ"
                    url=Signal::derive(move || vm.form.get().logo_url)
                    upload=Signal::derive(move || vm.form.get().logo_upload)
                    on_url=Callback::new(move |v| vm.form.update(|f| f.logo_url = v))
                    on_upload=Callback::new(move |v| vm.form.update(|f| f.logo_upload = v))
                />

                <div class="form-group">
                    <label for="website">"ウェブサイト"</label>
                    <input
                        type="url"
                        id="website"
                        prop:value=move || vm.form.get().website
                        on:input=move |ev| vm.form.update(|f| f.website = event_target_value(&ev))
                        placeholder="https://"
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="established">"創業年"</label>
                        <input
                            type="text"
                            id="established"
                            prop:value=move || vm.form.get().established
                            on:input=move |ev| vm.form.update(|f| f.established = event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="locations">"展開地域（カンマ区切り）"</label>
                        <input
                            type="text"
                            id="locations"
                            prop:value=move || vm.form.get().locations
                            on:input=move |ev| vm.form.update(|f| f.locations = event_target_value(&ev))
                            placeholder="東京, 大阪"
                        />
                    </div>
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
