//! VPN connection dropdown.
//!
//! SYSTEM CONTEXT
//! ==============
//! Opening the dropdown refreshes the team's connection slots. Each slot can
//! download its WireGuard config, which is saved through a temporary object
//! URL as `conn_<n>.conf`.

#[cfg(test)]
#[path = "vpn_dropdown_test.rs"]
mod vpn_dropdown_test;

use feed::api::VpnConnection;
use leptos::prelude::*;

use crate::state::vpn::VpnState;

fn slot_label(conn: &VpnConnection) -> String {
    let number = conn
        .conn_id
        .split_once('_')
        .map_or(conn.conn_id.as_str(), |(_, n)| n);
    format!("Connection {number}")
}

fn status_label(conn: &VpnConnection) -> &'static str {
    if conn.is_used() { "In use" } else { "Available" }
}

/// Toggle caption; shows slot usage once the list has been loaded.
fn toggle_label(state: &VpnState) -> String {
    if state.connections.is_empty() {
        return "VPN".to_owned();
    }
    format!("VPN ({}/{} in use)", state.used_count(), state.connections.len())
}

#[cfg(feature = "csr")]
fn save_text_file(name: &str, contents: &str) -> Result<(), String> {
    use wasm_bindgen::JsCast;

    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(contents));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/plain");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|e| format!("{e:?}"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("{e:?}"))?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_owned())?;
    let anchor = document
        .create_element("a")
        .map_err(|e| format!("{e:?}"))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "not an anchor".to_owned())?;
    anchor.set_href(&url);
    anchor.set_download(name);
    anchor.click();
    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

#[component]
pub fn VpnDropdown() -> impl IntoView {
    let vpn = RwSignal::new(VpnState::default());

    let on_toggle = move |_| {
        let refresh = vpn.try_update(VpnState::toggle_open).unwrap_or(false);
        if !refresh {
            return;
        }
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let result = crate::net::api::vpn_status().await;
            vpn.update(|v| v.set_loaded(result));
        });
    };

    let on_download = move |conn: VpnConnection| {
        let Some(file_name) = conn.config_file_name() else {
            vpn.update(|v| v.error = Some(format!("unknown connection id {}", conn.conn_id)));
            return;
        };
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let saved = crate::net::api::vpn_download(&conn.conn_id)
                .await
                .and_then(|config| save_text_file(&file_name, &config));
            if let Err(e) = saved {
                leptos::logging::warn!("vpn download {}: {e}", conn.conn_id);
                vpn.update(|v| v.error = Some(e));
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = file_name;
        }
    };

    view! {
        <div class="vpn-dropdown" class:vpn-dropdown--open=move || vpn.get().open>
            <button class="btn vpn-dropdown__toggle" on:click=on_toggle>
                {move || vpn.with(toggle_label)}
            </button>
            <Show when=move || vpn.get().open>
                <div class="vpn-dropdown__menu">
                    <Show when=move || vpn.get().loading>
                        <div class="vpn-dropdown__loading">"Loading…"</div>
                    </Show>
                    <Show when=move || vpn.get().error.is_some()>
                        <div class="vpn-dropdown__error">{move || vpn.get().error.unwrap_or_default()}</div>
                    </Show>
                    <ul class="vpn-dropdown__list">
                        {move || {
                            vpn.get()
                                .connections
                                .into_iter()
                                .map(|conn| {
                                    let used = conn.is_used();
                                    let label = slot_label(&conn);
                                    let status = status_label(&conn);
                                    view! {
                                        <li class="vpn-dropdown__item" class:vpn-dropdown__item--used=used>
                                            <span class="vpn-dropdown__name">{label}</span>
                                            <span class="vpn-dropdown__status">{status}</span>
                                            <button
                                                class="btn vpn-dropdown__download"
                                                on:click=move |_| on_download(conn.clone())
                                            >
                                                "Download"
                                            </button>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </div>
            </Show>
        </div>
    }
}
