use crate::shared::components::PageHeader;
use crate::shared::dialogs::confirm;
use crate::shared::icons::icon;
use crate::shared::page_frame::{PageCategory, PageFrame};
use crate::shared::state::use_stores;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_import_chain_menus::{Chain, ImportChainMenus, ImportSummary};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ImportChainMenusPage() -> impl IntoView {
    let stores = use_stores();
    let history = RwSignal::new(Vec::<ImportSummary>::new());

    let current_count = move |chain: Chain| {
        stores
            .restaurants
            .with(|d| d.menus_of(chain.restaurant_id()).len())
    };

    let run_import = move |chain: Chain| {
        let existing = current_count(chain);
        if existing > 0
            && !confirm(&format!(
                "{}の既存メニュー {} 件を置き換えます。よろしいですか？",
                chain.label(),
                existing
            ))
        {
            return;
        }
        log::info!("u501: importing {}", chain.restaurant_id());
        let result = stores.with_restaurants(|d, now| d.import_chain(chain, now));
        match result {
            Ok(summary) => {
                stores.notices.success(summary.message());
                history.update(|h| h.insert(0, summary));
            }
            // the batch is applied in memory even when the write fails
            Err(e) if e.is_persist_failure() => {
                stores.notices.error(e.to_string());
            }
            Err(e) => {
                stores.notices.error(format!("{}のインポートに失敗しました: {}", chain.label(), e));
            }
        }
    };

    view! {
        <PageFrame page_id="u501_import_chain_menus--usecase" category=PageCategory::UseCase>
            <PageHeader title=ImportChainMenus::display_name() subtitle=ImportChainMenus::description().to_string() />

            <div class="warning-box">
                <span class="warning-box__icon">"ℹ"</span>
                <span class="warning-box__text">
                    "インポートすると、そのチェーンのメニューはすべて置き換えられます。レストラン情報は未登録の場合のみ追加されます。"
                </span>
            </div>

            <div class="card-grid card-grid--narrow">
                {Chain::all().into_iter().map(|chain| view! {
                    <div class="import-card">
                        <div class="import-card__title">
                            {icon("restaurant")}
                            {chain.label()}
                        </div>
                        <div class="import-card__meta">
                            {move || format!("登録済み {} 件", current_count(chain))}
                        </div>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || stores.restaurants_loading.get())
                            on_click=move |_| run_import(chain)
                        >
                            {icon("import")}
                            "インポート"
                        </Button>
                    </div>
                }).collect_view()}
            </div>

            <Show when=move || history.with(|h| !h.is_empty())>
                <section class="import-history">
                    <h3>"実行結果"</h3>
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">"チェーン"</th>
                                <th class="table__header-cell table__header-cell--number">"削除"</th>
                                <th class="table__header-cell table__header-cell--number">"追加"</th>
                                <th class="table__header-cell">"レストラン"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || history.get().into_iter().map(|s| view! {
                                <tr class="table__row">
                                    <td class="table__cell">{s.restaurant_name.clone()}</td>
                                    <td class="table__cell table__cell--number">{s.replaced}</td>
                                    <td class="table__cell table__cell--number">{s.imported}</td>
                                    <td class="table__cell">
                                        {if s.restaurant_created { "新規登録" } else { "既存を維持" }}
                                    </td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                </section>
            </Show>
        </PageFrame>
    }
}
