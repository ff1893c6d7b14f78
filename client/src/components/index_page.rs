//! Landing page widgets: lab network details and the theme toggle.

#[cfg(test)]
#[path = "index_page_test.rs"]
mod index_page_test;

use feed::AppContext;
use feed::api::LabInfo;
use leptos::prelude::*;

fn lab_mode_label(info: &LabInfo) -> &'static str {
    match info.is_vpn {
        0 => "Browser access",
        1 => "VPN access",
        _ => "Browser and VPN access",
    }
}

#[component]
pub fn IndexPage() -> impl IntoView {
    let ctx = expect_context::<RwSignal<AppContext>>();
    let lab = RwSignal::new(None::<Result<LabInfo, String>>);

    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            let result = crate::net::api::lab_info().await;
            if let Err(e) = &result {
                leptos::logging::warn!("lab info: {e}");
            }
            lab.set(Some(result));
        });
    }

    let on_theme = move |_| {
        let next = crate::util::theme::toggle(ctx.get_untracked().theme);
        ctx.update(|c| c.theme = next);
    };

    view! {
        <div class="index-page">
            <div class="index-page__lab">
                {move || match lab.get() {
                    None => view! { <span class="index-page__loading">"Loading lab details…"</span> }.into_any(),
                    Some(Err(_)) => {
                        view! { <span class="index-page__error">"Lab details unavailable"</span> }.into_any()
                    }
                    Some(Ok(info)) => {
                        let vpn = info.vpn_enabled();
                        let mode = lab_mode_label(&info);
                        let subnet = info.lab_subnet;
                        view! {
                            <span class="index-page__mode">{mode}</span>
                            <Show when=move || vpn>
                                <span class="index-page__subnet">
                                    "Lab subnet: "
                                    <code>{subnet.clone()}</code>
                                </span>
                            </Show>
                        }
                            .into_any()
                    }
                }}
            </div>
            <button class="btn index-page__theme" on:click=on_theme title="Toggle dark mode">
                {move || if ctx.get().theme == feed::Theme::Dark { "☀" } else { "☾" }}
            </button>
        </div>
    }
}
