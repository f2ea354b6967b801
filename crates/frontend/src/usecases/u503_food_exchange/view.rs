use crate::shared::components::{PageHeader, StatCard};
use crate::shared::dialogs::confirm_twice;
use crate::shared::export::download_json;
use crate::shared::files::{read_text, reset_input, selected_file};
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::state::{use_stores, AppStores, DomainError};
use contracts::domain::common::{now_iso, today};
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u503_food_exchange::{
    export_filename, format_storage_usage, parse_import, FoodExchange,
};
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

fn export(stores: AppStores) {
    let document = stores.foods.with_untracked(|d| d.export_document(&now_iso()));
    let result = document
        .to_pretty_json()
        .map_err(|e| e.to_string())
        .and_then(|json| download_json(&json, &export_filename(&today())));
    match result {
        Ok(()) => stores.notices.success(format!(
            "食材 {} 件・カテゴリー {} 件をエクスポートしました",
            document.foods.len(),
            document.categories.len()
        )),
        Err(e) => stores.notices.error(format!("エクスポートに失敗しました: {}", e)),
    }
}

/// Parse the whole file first; nothing is applied unless it is valid
fn import_text(stores: AppStores, raw: &str) {
    let data = match parse_import(raw) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("u503: import rejected: {}", e);
            stores.notices.error(format!("インポートに失敗しました: {}", e));
            return;
        }
    };
    let foods = data.foods.as_ref().map(Vec::len);
    let categories = data.categories.as_ref().map(Vec::len);

    let result = stores.with_foods(|d, now| d.apply_import(data, now));
    if stores.report(result).is_some() {
        let mut parts = Vec::new();
        if let Some(n) = foods {
            parts.push(format!("食材 {} 件", n));
        }
        if let Some(n) = categories {
            parts.push(format!("カテゴリー {} 件", n));
        }
        stores
            .notices
            .success(format!("{}をインポートしました", parts.join("・")));
    }
}

fn reset(stores: AppStores, usage: RwSignal<Option<usize>>) {
    if !confirm_twice(
        "すべてのデータ（レストラン・メニュー・食材・カテゴリー・お気に入り・プラン）を削除しますか？",
        "本当に削除しますか？この操作は元に戻せません。",
    ) {
        return;
    }
    match stores.reset_all() {
        Ok(()) => stores.notices.success("すべてのデータを削除しました"),
        Err(DomainError::Persist(e)) => stores.notices.error(format!("一部のデータを削除できませんでした: {}", e)),
        Err(e) => stores.notices.error(e.to_string()),
    }
    usage.set(stores.storage_usage().ok());
}

#[component]
pub fn FoodExchangePage() -> impl IntoView {
    let stores = use_stores();
    let importing = RwSignal::new(false);
    let usage = RwSignal::new(stores.storage_usage().ok());

    // any store mutation may change the stored size
    Effect::new(move |_| {
        stores.restaurants.track();
        stores.foods.track();
        stores.favorites.track();
        usage.set(stores.storage_usage().ok());
    });

    let on_file = move |ev: leptos::ev::Event| {
        let Some(file) = selected_file(&ev) else {
            return;
        };
        reset_input(&ev);
        importing.set(true);
        spawn_local(async move {
            match read_text(&file).await {
                Ok(raw) => import_text(stores, &raw),
                Err(e) => stores.notices.error(e),
            }
            importing.set(false);
        });
    };

    let counts = move || {
        let (foods, categories) = stores
            .foods
            .with(|d| (d.foods().len(), d.categories().len()));
        let (restaurants, menus) = stores
            .restaurants
            .with(|d| (d.restaurants().len(), d.menus().len()));
        (restaurants, menus, foods, categories)
    };

    view! {
        <PageFrame page_id="u503_food_exchange--usecase" category=PageCategory::UseCase>
            <PageHeader title=FoodExchange::display_name() subtitle=FoodExchange::description().to_string() />

            <div class="stat-grid">
                <StatCard
                    label="使用容量"
                    icon_name="data"
                    value=Signal::derive(move || {
                        usage.get().map(format_storage_usage).unwrap_or_else(|| "不明".to_string())
                    })
                />
                <StatCard
                    label="レストラン / メニュー"
                    icon_name="restaurant"
                    value=Signal::derive(move || {
                        let (r, m, _, _) = counts();
                        format!("{} / {}", r, m)
                    })
                />
                <StatCard
                    label="食材 / カテゴリー"
                    icon_name="food"
                    value=Signal::derive(move || {
                        let (_, _, f, c) = counts();
                        format!("{} / {}", f, c)
                    })
                />
            </div>

            <section class="data-section">
                <h3>{icon("download")}"エクスポート"</h3>
                <p>"食材とカテゴリーをJSONファイルとしてダウンロードします。"</p>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| export(stores)>
                    "JSONをダウンロード"
                </Button>
            </section>

            <section class="data-section">
                <h3>{icon("upload")}"インポート"</h3>
                <p>
                    "ファイルに含まれる foods / categories の配列で、それぞれのデータを置き換えます。"
                    "ファイル全体が正しい場合のみ反映されます。"
                </p>
                <label class="button button--secondary file-button">
                    "JSONファイルを選択"
                    <input
                        type="file"
                        accept="application/json,.json"
                        class="file-button__input"
                        disabled=move || importing.get()
                        on:change=on_file
                    />
                </label>
                <Show when=move || importing.get()>
                    <Spinner />
                </Show>
            </section>

            <section class="data-section data-section--danger">
                <h3>{icon("delete")}"全データ削除"</h3>
                <p>"このアプリが保存したデータをすべて削除します。元に戻せません。"</p>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| reset(stores, usage)>
                    "すべてのデータを削除"
                </Button>
            </section>
        </PageFrame>
    }
}
