//! Browser shell: mounts the catalog view and wires it to the driver.

use std::rc::Rc;

use yew::prelude::*;
use yewdux::prelude::{use_dispatch, use_selector};

use crate::components::catalog_table::PartitionTable;
use crate::components::detail::DetailPanel;
use crate::components::settings::SettingsPanel;
use crate::components::toast::ToastHost;
use crate::components::toolbar::Toolbar;
use crate::core::store::AppStore;
use crate::features::catalog::actions::Command;
use crate::features::catalog::state::CatalogState;
use crate::models::PartitionKind;
use crate::services::http::HttpCatalogService;
use driver::CatalogDriver;
use preferences::{api_base_url, load_catalog_config};

mod driver;
mod host;
pub(crate) mod preferences;

#[function_component(WallvaultApp)]
fn wallvault_app() -> Html {
    let base_url = use_memo((), |_| api_base_url());
    let dispatch = use_dispatch::<AppStore>();
    let driver = {
        let base_url = (*base_url).clone();
        use_memo((), move |_| {
            let config = load_catalog_config();
            dispatch.reduce_mut(|store| store.catalog = CatalogState::new(&config));
            CatalogDriver::new(dispatch, HttpCatalogService::new(base_url))
        })
    };
    let on_command = {
        let driver = Rc::clone(&driver);
        Callback::from(move |command: Command| driver.send(command))
    };
    {
        let driver = Rc::clone(&driver);
        use_effect_with((), move |_| {
            driver.send(Command::LoadInitial);
            || ()
        });
    }

    let filter = use_selector(|store: &AppStore| store.catalog.filter.clone());
    let users = use_selector(|store: &AppStore| store.catalog.users.clone());
    let page_size = use_selector(|store: &AppStore| store.catalog.page_size);
    let stats = use_selector(|store: &AppStore| store.catalog.stats.clone());
    let path_status = use_selector(|store: &AppStore| store.catalog.path_status);
    let selected = use_selector(|store: &AppStore| store.catalog.selected.clone());
    let select_all = use_selector(|store: &AppStore| store.catalog.select_all_tri_state());
    let loading = use_selector(|store: &AppStore| store.catalog.is_loading());
    let subscribed = use_selector(|store: &AppStore| store.catalog.subscribed.clone());
    let unsubscribed = use_selector(|store: &AppStore| store.catalog.unsubscribed.clone());
    let subscribed_view =
        use_selector(|store: &AppStore| store.catalog.page_view(PartitionKind::Subscribed));
    let unsubscribed_view =
        use_selector(|store: &AppStore| store.catalog.page_view(PartitionKind::Unsubscribed));
    let current = use_selector(|store: &AppStore| store.catalog.current.clone());
    let settings = use_selector(|store: &AppStore| store.catalog.settings.clone());
    let toasts = use_selector(|store: &AppStore| store.catalog.toasts.clone());

    let on_dismiss = on_command.reform(Command::DismissToast);

    html! {
        <main class="container mx-auto flex flex-col gap-4 p-4">
            <h1 class="text-2xl font-bold">{"Wallvault"}</h1>
            <Toolbar
                filter={(*filter).clone()}
                users={(*users).clone()}
                page_size={*page_size}
                stats={(*stats).clone()}
                path_status={*path_status}
                selected_count={selected.len()}
                loading={*loading}
                on_command={on_command.clone()}
            />
            <div class="grid gap-4 lg:grid-cols-3">
                <div class="flex flex-col gap-4 lg:col-span-2">
                    <PartitionTable
                        kind={PartitionKind::Subscribed}
                        partition={(*subscribed).clone()}
                        view={(*subscribed_view).clone()}
                        on_command={on_command.clone()}
                    />
                    <PartitionTable
                        kind={PartitionKind::Unsubscribed}
                        partition={(*unsubscribed).clone()}
                        view={(*unsubscribed_view).clone()}
                        selected={(*selected).clone()}
                        select_all={*select_all}
                        on_command={on_command.clone()}
                    />
                </div>
                <div class="flex flex-col gap-4">
                    <DetailPanel
                        row={(*current).clone()}
                        base_url={AttrValue::from((*base_url).clone())}
                        on_command={on_command.clone()}
                    />
                    <SettingsPanel settings={(*settings).clone()} on_command={on_command} />
                </div>
            </div>
            <ToastHost toasts={(*toasts).clone()} on_dismiss={on_dismiss} />
        </main>
    }
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<WallvaultApp>::with_root(root).render();
    } else {
        yew::Renderer::<WallvaultApp>::new().render();
    }
}
