//! Flag submission form for one challenge.
//!
//! Mounted standalone on a challenge page (tag from `data-tag`) and inline in
//! each card of the challenge browser. The input is only cleared when the
//! server accepts the flag; a rejected or failed submission keeps what the
//! user typed so they can correct it.

use feed::FlagForm;
use leptos::prelude::*;

#[component]
pub fn FlagChecker(tag: Option<String>) -> impl IntoView {
    let form = RwSignal::new(FlagForm::default());
    let pending = RwSignal::new(false);
    let tag = StoredValue::new(tag);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let Some(tag) = tag.get_value() else {
            leptos::logging::warn!("flag checker has no challenge tag");
            return;
        };
        let flag = form.get_untracked().input;
        form.update(FlagForm::begin);

        #[cfg(feature = "csr")]
        {
            pending.set(true);
            leptos::task::spawn_local(async move {
                let result = crate::net::api::submit_flag(&tag, &flag).await;
                form.update(|f| match &result {
                    Ok(outcome) => f.apply_outcome(outcome),
                    Err(e) => f.apply_error(e),
                });
                pending.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (tag, flag);
        }
    };

    view! {
        <form class="flag-checker" on:submit=on_submit>
            <div class="flag-checker__row">
                <input
                    class="flag-checker__input"
                    type="text"
                    placeholder="flag{...}"
                    autocomplete="off"
                    prop:value=move || form.get().input
                    on:input=move |ev| form.update(|f| f.input = event_target_value(&ev))
                />
                <button class="btn flag-checker__submit" type="submit" disabled=move || pending.get()>
                    {move || if pending.get() { "Checking…" } else { "Submit" }}
                </button>
            </div>
            <Show when=move || form.get().error.is_some()>
                <p class="flag-checker__message flag-checker__message--error">
                    {move || form.get().error.unwrap_or_default()}
                </p>
            </Show>
            <Show when=move || form.get().success.is_some()>
                <p class="flag-checker__message flag-checker__message--success">
                    {move || form.get().success.unwrap_or_default()}
                </p>
            </Show>
        </form>
    }
}
