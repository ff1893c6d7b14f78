//! Mount roots and the shared app context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages are rendered by the platform server, which drops empty elements with
//! well-known ids where interactive widgets belong. Every root is optional;
//! [`mount_all`] mounts whatever the current page contains, each with its own
//! reactive owner and a copy of the [`AppContext`] read once at startup.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use feed::{AppContext, Challenge};
use leptos::prelude::*;

use crate::components::challenges_page::ChallengesPage;
use crate::components::flag_checker::FlagChecker;
use crate::components::index_page::IndexPage;
use crate::components::reset_frontend::ResetFrontend;
use crate::components::scoreboard::Scoreboard;
use crate::components::teams_page::TeamsPage;
use crate::components::vpn_dropdown::VpnDropdown;

/// Known mount elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountPoint {
    FlagChecker,
    Scoreboard,
    Challenges,
    TeamsPage,
    IndexPage,
    VpnDropdown,
    VpnDropdownSecondary,
    ResetFrontend,
}

impl MountPoint {
    pub const ALL: [Self; 8] = [
        Self::FlagChecker,
        Self::Scoreboard,
        Self::Challenges,
        Self::TeamsPage,
        Self::IndexPage,
        Self::VpnDropdown,
        Self::VpnDropdownSecondary,
        Self::ResetFrontend,
    ];

    #[must_use]
    pub fn element_id(self) -> &'static str {
        match self {
            Self::FlagChecker => "flagchecker",
            Self::Scoreboard => "scoreboard",
            Self::Challenges => "challenges",
            Self::TeamsPage => "teamspagevue",
            Self::IndexPage => "indexpage",
            Self::VpnDropdown => "vpn-dropdown",
            Self::VpnDropdownSecondary => "vpn-dropdown-2",
            Self::ResetFrontend => "reset-frontend",
        }
    }
}

/// `data-*` attributes read from a mount element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MountAttrs {
    /// `data-tag`: challenge tag for a standalone flag checker.
    pub tag: Option<String>,
    /// `data-challenges`: JSON seed for the grouped challenge list.
    pub seed: Vec<Challenge>,
}

impl MountAttrs {
    /// Build from raw attribute values. A malformed seed yields an empty list.
    #[must_use]
    pub fn from_raw(tag: Option<String>, seed_json: Option<&str>) -> Self {
        let tag = tag.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty());
        let seed = seed_json
            .and_then(|raw| serde_json::from_str::<Vec<Challenge>>(raw).ok())
            .unwrap_or_default();
        Self { tag, seed }
    }
}

/// Mount every root found on the current page.
#[cfg(feature = "csr")]
pub fn mount_all() {
    use wasm_bindgen::JsCast;

    let ctx = crate::util::theme::read_context();
    crate::util::theme::apply(ctx.theme);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    for point in MountPoint::ALL {
        let Some(element) = document.get_element_by_id(point.element_id()) else {
            continue;
        };
        let seed_json = element.get_attribute("data-challenges");
        let attrs = MountAttrs::from_raw(element.get_attribute("data-tag"), seed_json.as_deref());
        let Ok(parent) = element.dyn_into::<web_sys::HtmlElement>() else {
            leptos::logging::warn!("mount point #{} is not an HTML element", point.element_id());
            continue;
        };
        leptos::mount::mount_to(parent, move || view! { <Root ctx=ctx point=point attrs=attrs/> })
            .forget();
    }
}

/// One mounted root: provides the app context and renders the widget for `point`.
#[component]
pub fn Root(ctx: AppContext, point: MountPoint, attrs: MountAttrs) -> impl IntoView {
    provide_context(RwSignal::new(ctx));

    match point {
        MountPoint::FlagChecker => view! { <FlagChecker tag=attrs.tag/> }.into_any(),
        MountPoint::Scoreboard => view! { <Scoreboard/> }.into_any(),
        MountPoint::Challenges => view! { <ChallengesPage seed=attrs.seed/> }.into_any(),
        MountPoint::TeamsPage => view! { <TeamsPage/> }.into_any(),
        MountPoint::IndexPage => view! { <IndexPage/> }.into_any(),
        MountPoint::VpnDropdown | MountPoint::VpnDropdownSecondary => {
            view! { <VpnDropdown/> }.into_any()
        }
        MountPoint::ResetFrontend => view! { <ResetFrontend/> }.into_any(),
    }
}
