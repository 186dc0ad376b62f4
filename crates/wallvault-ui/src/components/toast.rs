use gloo::timers::callback::Timeout;
use yew::prelude::*;

use crate::models::{Toast, ToastKind};

const AUTO_DISMISS_MS: u32 = 4000;

#[derive(Properties, PartialEq)]
pub(crate) struct ToastHostProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<u64>,
}

#[function_component(ToastHost)]
pub(crate) fn toast_host(props: &ToastHostProps) -> Html {
    {
        let toasts = props.toasts.clone();
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(toasts, move |list: &Vec<Toast>| {
            let handles: Vec<Timeout> = list
                .iter()
                .map(|toast| {
                    let on_dismiss = on_dismiss.clone();
                    let id = toast.id;
                    Timeout::new(AUTO_DISMISS_MS, move || on_dismiss.emit(id))
                })
                .collect();
            move || drop(handles)
        });
    }

    html! {
        <div class="toast toast-end" aria-live="polite" aria-atomic="true">
            {for props.toasts.iter().map(|toast| render_toast(toast, &props.on_dismiss))}
        </div>
    }
}

fn render_toast(toast: &Toast, on_dismiss: &Callback<u64>) -> Html {
    let class = match toast.kind {
        ToastKind::Info => "alert-info",
        ToastKind::Success => "alert-success",
        ToastKind::Error => "alert-error",
    };
    let id = toast.id;
    let on_close = on_dismiss.reform(move |_: MouseEvent| id);

    html! {
        <div class={classes!("alert", class)} role="status">
            <span>{toast.message.clone()}</span>
            <button class="btn btn-ghost btn-xs" aria-label="Dismiss" onclick={on_close}>{"✕"}</button>
        </div>
    }
}
