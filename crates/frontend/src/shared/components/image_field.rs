use crate::shared::files::{read_data_uri, reset_input, selected_file};
use crate::shared::icons::icon;
use contracts::domain::common::ImageSource;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// URL input plus file upload. An uploaded file wins over the URL.
#[component]
pub fn ImageField(
    label: &'static str,
    #[prop(into)]
    url: Signal<String>,
    #[prop(into)]
    upload: Signal<Option<String>>,
    on_url: Callback<String>,
    on_upload: Callback<Option<String>>,
) -> impl IntoView {
    let (reading, set_reading) = signal(false);
    let (read_error, set_read_error) = signal::<Option<String>>(None);

    let preview = move || ImageSource::resolve(&url.get(), upload.get()).src().map(str::to_string);

    let on_file = move |ev: web_sys::Event| {
        let Some(file) = selected_file(&ev) else {
            return;
        };
        reset_input(&ev);
        set_reading.set(true);
        set_read_error.set(None);
        spawn_local(async move {
            match read_data_uri(&file).await {
                Ok(data) => on_upload.run(Some(data)),
                Err(e) => {
                    log::warn!("image upload failed: {}", e);
                    set_read_error.set(Some(e));
                }
            }
            set_reading.set(false);
        });
    };

    view! {
        <div class="form-group image-field">
            <label>{label}</label>
            <input
                type="url"
                placeholder="https://..."
                prop:value=move || url.get()
                prop:disabled=move || upload.get().is_some()
                on:input=move |ev| on_url.run(event_target_value(&ev))
            />
            <div class="image-field__upload">
                <input type="file" accept="image/*" on:change=on_file />
                <Show when=move || upload.get().is_some()>
                    <button class="button button--secondary" on:click=move |_| on_upload.run(None)>
                        {icon("x")}
                        "アップロード画像を外す"
                    </button>
                </Show>
                <Show when=move || reading.get()>
                    <span class="text-muted">"読み込み中..."</span>
                </Show>
            </div>
            {move || read_error.get().map(|e| view! { <div class="error">{e}</div> })}
            {move || preview().map(|src| view! {
                <img class="image-field__preview" src=src alt=label />
            })}
        </div>
    }
}

/// Small image for table cells; a placeholder when there is none
#[component]
pub fn Thumbnail(#[prop(into)] src: Option<String>, #[prop(optional)] alt: String) -> impl IntoView {
    match src {
        Some(src) => view! { <img class="thumbnail" src=src alt=alt /> }.into_any(),
        None => view! { <div class="thumbnail thumbnail--empty">"🍽"</div> }.into_any(),
    }
}
