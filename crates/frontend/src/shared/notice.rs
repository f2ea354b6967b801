//! Transient banner messages shown above the tab content.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

const DISMISS_AFTER_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

impl NoticeKind {
    fn class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "notice notice--success",
            NoticeKind::Info => "notice notice--info",
            NoticeKind::Error => "notice notice--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    id: u64,
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Clone, Copy)]
pub struct NoticeService {
    current: RwSignal<Vec<Notice>>,
    next_id: RwSignal<u64>,
}

impl NoticeService {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NoticeKind::Success, text.into());
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(NoticeKind::Info, text.into());
    }

    /// Errors stay until dismissed
    pub fn error(&self, text: impl Into<String>) {
        self.push(NoticeKind::Error, text.into());
    }

    fn push(&self, kind: NoticeKind, text: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.current.update(|list| list.push(Notice { id, kind, text }));

        if kind != NoticeKind::Error {
            let svc = *self;
            spawn_local(async move {
                TimeoutFuture::new(DISMISS_AFTER_MS).await;
                svc.dismiss(id);
            });
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.current.update(|list| list.retain(|n| n.id != id));
    }
}

impl Default for NoticeService {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn NoticeHost() -> impl IntoView {
    let notices = use_context::<NoticeService>().expect("NoticeService not provided in context");

    view! {
        <div class="notice-host">
            <For
                each=move || notices.current.get()
                key=|n| n.id
                children=move |n: Notice| {
                    let id = n.id;
                    view! {
                        <div class=n.kind.class()>
                            <span class="notice__text">{n.text.clone()}</span>
                            <button class="notice__close" on:click=move |_| notices.dismiss(id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
