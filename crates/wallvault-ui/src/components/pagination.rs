use yew::prelude::*;

use crate::core::pagination::{PageSlot, PageView};

#[derive(Properties, PartialEq)]
pub(crate) struct PaginationProps {
    pub current: u32,
    pub view: PageView,
    pub on_change: Callback<u32>,
}

#[function_component(Pagination)]
pub(crate) fn pagination(props: &PaginationProps) -> Html {
    if props.view.page_count <= 1 {
        return html! {};
    }
    let current = props.current;
    let go_prev = props.on_change.reform(move |_: MouseEvent| current - 1);
    let go_next = props.on_change.reform(move |_: MouseEvent| current + 1);

    html! {
        <div class="join pagination">
            <button class="btn btn-sm join-item" disabled={!props.view.can_prev} onclick={go_prev}>{"«"}</button>
            {for props.view.visible.iter().map(|slot| match *slot {
                PageSlot::Page(page) => {
                    let onclick = props.on_change.reform(move |_: MouseEvent| page);
                    html! {
                        <button
                            class={classes!("btn", "btn-sm", "join-item", (page == current).then_some("btn-active"))}
                            onclick={onclick}
                        >
                            {page}
                        </button>
                    }
                }
                PageSlot::Ellipsis => html! {
                    <button class="btn btn-sm join-item btn-disabled">{"…"}</button>
                },
            })}
            <button class="btn btn-sm join-item" disabled={!props.view.can_next} onclick={go_next}>{"»"}</button>
        </div>
    }
}
