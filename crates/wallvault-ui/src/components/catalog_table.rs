//! One paginated partition rendered as a table.

use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::pagination::Pagination;
use crate::core::pagination::PageView;
use crate::features::catalog::actions::Command;
use crate::features::catalog::selection::TriState;
use crate::features::catalog::state::{Partition, SelectionSet};
use crate::models::{CatalogRow, PartitionKind};

#[derive(Properties, PartialEq)]
pub(crate) struct PartitionTableProps {
    pub kind: PartitionKind,
    pub partition: Partition,
    pub view: PageView,
    /// Selection is only offered for the unsubscribed partition.
    #[prop_or_default]
    pub selected: SelectionSet,
    #[prop_or(TriState::Unchecked)]
    pub select_all: TriState,
    pub on_command: Callback<Command>,
}

#[function_component(PartitionTable)]
pub(crate) fn partition_table(props: &PartitionTableProps) -> Html {
    let selectable = props.kind == PartitionKind::Unsubscribed;
    let select_all_ref = use_node_ref();
    {
        let select_all_ref = select_all_ref.clone();
        use_effect_with(props.select_all, move |state: &TriState| {
            if let Some(input) = select_all_ref.cast::<HtmlInputElement>() {
                input.set_indeterminate(*state == TriState::Indeterminate);
                input.set_checked(*state == TriState::Checked);
            }
            || ()
        });
    }

    let kind = props.kind;
    let on_page = props
        .on_command
        .reform(move |page| Command::PageRequested { kind, page });
    let on_select_all = props.on_command.reform(|event: Event| {
        let checked = event
            .target_dyn_into::<HtmlInputElement>()
            .is_some_and(|input| input.checked());
        Command::SelectAllToggled(checked)
    });

    html! {
        <section class="card bg-base-200">
            <div class="card-body">
                <h2 class="card-title">
                    {kind.status_label()}
                    <span class="badge badge-neutral">{props.partition.total}</span>
                </h2>
                <div class="overflow-x-auto">
                    <table class="table table-zebra table-sm">
                        <thead>
                            <tr>
                                if selectable {
                                    <th>
                                        <input
                                            type="checkbox"
                                            class="checkbox checkbox-sm"
                                            ref={select_all_ref}
                                            aria-label="Select all on this page"
                                            onchange={on_select_all}
                                        />
                                    </th>
                                }
                                <th>{"ID"}</th>
                                <th>{"Title"}</th>
                                <th>{"Size"}</th>
                                <th>{"Subscribers"}</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {for props.partition.rows.iter().map(|row| render_row(row, selectable, props.selected.contains(&row.id), &props.on_command))}
                        </tbody>
                    </table>
                </div>
                <Pagination current={props.partition.page} view={props.view.clone()} on_change={on_page} />
            </div>
        </section>
    }
}

fn render_row(row: &CatalogRow, selectable: bool, checked: bool, on_command: &Callback<Command>) -> Html {
    let on_toggle = {
        let id = row.id.clone();
        on_command.reform(move |event: Event| Command::SelectionToggled {
            id: id.clone(),
            selected: event
                .target_dyn_into::<HtmlInputElement>()
                .is_some_and(|input| input.checked()),
        })
    };
    let on_detail = {
        let id = row.id.clone();
        on_command.reform(move |_: MouseEvent| Command::DetailRequested(id.clone()))
    };
    let on_open = {
        let id = row.id.clone();
        on_command.reform(move |_: MouseEvent| Command::OpenFolderRequested(id.clone()))
    };
    let on_delete = {
        let id = row.id.clone();
        let on_command = on_command.clone();
        Callback::from(move |_: MouseEvent| {
            if gloo::dialogs::confirm("Delete this wallpaper from disk?") {
                on_command.emit(Command::DeleteOneRequested(id.clone()));
            }
        })
    };

    html! {
        <tr key={row.id.clone()}>
            if selectable {
                <td>
                    <input type="checkbox" class="checkbox checkbox-sm" checked={checked} onchange={on_toggle} />
                </td>
            }
            <td class="font-mono">{row.id.clone()}</td>
            <td><a class="link" onclick={on_detail}>{row.title.clone()}</a></td>
            <td>{row.size_label.clone()}</td>
            <td>{row.subscriber_count.map_or_else(|| "-".to_string(), |count| count.to_string())}</td>
            <td class="flex gap-1">
                <button class="btn btn-ghost btn-xs" onclick={on_open}>{"Open folder"}</button>
                <button class="btn btn-error btn-xs" onclick={on_delete}>{"Delete"}</button>
            </td>
        </tr>
    }
}
