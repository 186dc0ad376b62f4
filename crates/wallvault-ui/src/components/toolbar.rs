//! Filter controls, statistics and bulk actions.

use std::num::NonZeroU32;

use wallvault_api_models::{CatalogStats, PathStatus, UserSummary};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::app::preferences::today;
use crate::features::catalog::actions::Command;
use crate::features::catalog::state::{FilterState, UserFilter};
use crate::models::PartitionKind;

const PAGE_SIZES: [u32; 4] = [20, 40, 100, 200];

#[derive(Properties, PartialEq)]
pub(crate) struct ToolbarProps {
    pub filter: FilterState,
    pub users: Vec<UserSummary>,
    pub page_size: NonZeroU32,
    pub stats: Option<CatalogStats>,
    pub path_status: Option<PathStatus>,
    pub selected_count: usize,
    pub loading: bool,
    pub on_command: Callback<Command>,
}

#[function_component(Toolbar)]
pub(crate) fn toolbar(props: &ToolbarProps) -> Html {
    let on_search = props.on_command.reform(|event: InputEvent| {
        let value = event
            .target_dyn_into::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default();
        Command::SearchChanged(value)
    });
    let on_user = props.on_command.reform(|event: Event| {
        let value = event
            .target_dyn_into::<HtmlSelectElement>()
            .map(|select| select.value())
            .unwrap_or_default();
        Command::UserFilterChanged(value)
    });
    let on_page_size = {
        let on_command = props.on_command.clone();
        Callback::from(move |event: Event| {
            let parsed = event
                .target_dyn_into::<HtmlSelectElement>()
                .and_then(|select| select.value().parse::<NonZeroU32>().ok());
            if let Some(size) = parsed {
                on_command.emit(Command::PageSizeChanged(size));
            }
        })
    };
    let on_delete_selected = {
        let on_command = props.on_command.clone();
        let count = props.selected_count;
        Callback::from(move |_: MouseEvent| {
            if gloo::dialogs::confirm(&format!("Delete {count} selected wallpapers?")) {
                on_command.emit(Command::DeleteSelectedRequested);
            }
        })
    };
    let on_delete_all = {
        let on_command = props.on_command.clone();
        Callback::from(move |_: MouseEvent| {
            if gloo::dialogs::confirm("Delete every unsubscribed wallpaper matching the current filter?") {
                on_command.emit(Command::DeleteAllUnsubscribedRequested);
            }
        })
    };
    let export = |kind: PartitionKind| {
        props
            .on_command
            .reform(move |_: MouseEvent| Command::ExportRequested { kind, date: today() })
    };
    let on_refresh = props.on_command.reform(|_: MouseEvent| Command::Reload);
    let selected_user = props.filter.user.as_param().unwrap_or("all").to_string();

    html! {
        <div class="flex flex-col gap-3">
            <div class="flex flex-wrap items-center gap-2">
                <input
                    type="search"
                    class="input input-bordered input-sm"
                    placeholder="Search by title or ID"
                    value={props.filter.search.clone()}
                    oninput={on_search}
                />
                <select class="select select-bordered select-sm" onchange={on_user}>
                    <option value="all" selected={props.filter.user == UserFilter::All}>{"All users"}</option>
                    {for props.users.iter().map(|user| html! {
                        <option value={user.id.clone()} selected={selected_user == user.id}>
                            {format!("{} ({})", user.display_name, user.subscription_count)}
                        </option>
                    })}
                </select>
                <select class="select select-bordered select-sm" onchange={on_page_size}>
                    {for PAGE_SIZES.iter().map(|size| html! {
                        <option value={size.to_string()} selected={*size == props.page_size.get()}>
                            {format!("{size} per page")}
                        </option>
                    })}
                </select>
                <button class="btn btn-sm" onclick={on_refresh}>{"Refresh"}</button>
                if props.loading {
                    <span class="loading loading-spinner loading-sm" aria-label="Loading"></span>
                }
            </div>
            {render_stats(props.stats.as_ref(), props.path_status)}
            <div class="flex flex-wrap gap-2">
                <button
                    class="btn btn-error btn-sm"
                    disabled={props.selected_count == 0}
                    onclick={on_delete_selected}
                >
                    {format!("Delete selected ({})", props.selected_count)}
                </button>
                <button class="btn btn-warning btn-sm" onclick={on_delete_all}>{"Delete all unsubscribed"}</button>
                <button class="btn btn-sm" onclick={export(PartitionKind::Subscribed)}>{"Export subscribed"}</button>
                <button class="btn btn-sm" onclick={export(PartitionKind::Unsubscribed)}>{"Export unsubscribed"}</button>
            </div>
        </div>
    }
}

fn render_stats(stats: Option<&CatalogStats>, paths: Option<PathStatus>) -> Html {
    let path_warning = paths.and_then(|status| {
        (!status.library_path_ok || !status.userdata_path_ok).then(|| {
            html! {
                <div class="alert alert-warning">
                    {"Steam library or userdata path is not reachable; check the configuration."}
                </div>
            }
        })
    });
    let Some(stats) = stats else {
        return html! { {for path_warning} };
    };
    html! {
        <>
            <div class="stats shadow">
                <div class="stat">
                    <div class="stat-title">{"Total"}</div>
                    <div class="stat-value text-lg">{stats.total.count}</div>
                    <div class="stat-desc">{stats.total.size_formatted.clone()}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">{"Subscribed"}</div>
                    <div class="stat-value text-lg">{stats.subscribed.count}</div>
                    <div class="stat-desc">{stats.subscribed.size_formatted.clone()}</div>
                </div>
                <div class="stat">
                    <div class="stat-title">{"Reclaimable"}</div>
                    <div class="stat-value text-lg">{stats.reclaimable().count}</div>
                    <div class="stat-desc">{stats.reclaimable().size_formatted.clone()}</div>
                </div>
            </div>
            {for path_warning}
        </>
    }
}
