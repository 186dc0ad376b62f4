//! Detail pane for the current item.

use wallvault_api_models::{SubscribedAt, paths};
use yew::prelude::*;

use crate::features::catalog::actions::Command;
use crate::models::CatalogRow;

#[derive(Properties, PartialEq)]
pub(crate) struct DetailPanelProps {
    pub row: Option<CatalogRow>,
    pub base_url: AttrValue,
    pub on_command: Callback<Command>,
}

#[function_component(DetailPanel)]
pub(crate) fn detail_panel(props: &DetailPanelProps) -> Html {
    let Some(row) = props.row.as_ref() else {
        return html! {
            <aside class="card bg-base-200">
                <div class="card-body text-sm opacity-70">{"Select a wallpaper to see its details."}</div>
            </aside>
        };
    };
    let on_copy = props.on_command.reform(|_: MouseEvent| Command::CopyPathRequested);
    let on_open = {
        let id = row.id.clone();
        props
            .on_command
            .reform(move |_: MouseEvent| Command::OpenFolderRequested(id.clone()))
    };

    html! {
        <aside class="card bg-base-200">
            <div class="card-body gap-2">
                <h2 class="card-title">{row.title.clone()}</h2>
                if row.preview_available {
                    <img
                        class="rounded max-h-48 object-contain"
                        alt={row.title.clone()}
                        src={format!("{}{}", props.base_url, paths::preview(&row.id))}
                    />
                }
                <dl class="grid grid-cols-2 gap-1 text-sm">
                    <dt>{"ID"}</dt><dd class="font-mono">{row.id.clone()}</dd>
                    <dt>{"Size"}</dt><dd>{row.size_label.clone()}</dd>
                    <dt>{"Status"}</dt><dd>{row.status_label()}</dd>
                    <dt>{"Path"}</dt><dd class="font-mono break-all">{row.path.clone()}</dd>
                </dl>
                if !row.subscriptions.is_empty() {
                    <table class="table table-xs">
                        <thead><tr><th>{"User"}</th><th>{"Active"}</th><th>{"Subscribed"}</th></tr></thead>
                        <tbody>
                            {for row.subscriptions.iter().map(|sub| html! {
                                <tr>
                                    <td class="font-mono">{sub.user_id.clone()}</td>
                                    <td>{if sub.is_active { "yes" } else { "no" }}</td>
                                    <td>{subscribed_label(sub.time_subscribed)}</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                }
                <div class="card-actions">
                    <button class="btn btn-sm" onclick={on_copy}>{"Copy path"}</button>
                    <button class="btn btn-sm" onclick={on_open}>{"Open folder"}</button>
                </div>
            </div>
        </aside>
    }
}

fn subscribed_label(at: SubscribedAt) -> String {
    match at {
        SubscribedAt::At(at) => at.format("%Y-%m-%d %H:%M").to_string(),
        SubscribedAt::Unknown => "unknown".to_string(),
    }
}
