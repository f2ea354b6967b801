use crate::app_shell::MainLayout;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::config::AppConfig;
use crate::shared::notice::NoticeService;
use crate::shared::state::AppStores;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());

    let notices = NoticeService::new();
    provide_context(notices);

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::error!("failed to read configuration, using defaults: {:#}", e);
        AppConfig::default()
    });
    let stores = AppStores::new(config, notices);
    provide_context(stores);
    stores.init();

    view! {
        <MainLayout />
    }
}
