//! Service configuration form.

use wallvault_api_models::{ConfigForm, ServiceConfig};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::features::catalog::actions::Command;

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsPanelProps {
    pub settings: Option<ServiceConfig>,
    pub on_command: Callback<Command>,
}

#[function_component(SettingsPanel)]
pub(crate) fn settings_panel(props: &SettingsPanelProps) -> Html {
    let form = use_state(ConfigForm::default);
    {
        let form = form.clone();
        use_effect_with(props.settings.clone(), move |settings: &Option<ServiceConfig>| {
            if let Some(config) = settings {
                form.set(ConfigForm::from_config(config));
            }
            || ()
        });
    }

    let text_field = |label: &'static str, value: String, apply: fn(&mut ConfigForm, String)| {
        let form = form.clone();
        let oninput = Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*form).clone();
                apply(&mut next, input.value());
                form.set(next);
            }
        });
        html! {
            <label class="form-control">
                <span class="label-text">{label}</span>
                <input class="input input-bordered input-sm" value={value} oninput={oninput} />
            </label>
        }
    };
    let on_debug = {
        let form = form.clone();
        Callback::from(move |event: Event| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*form).clone();
                next.debug = input.checked();
                form.set(next);
            }
        })
    };
    let on_load = props.on_command.reform(|_: MouseEvent| Command::ConfigRequested);
    let on_save = {
        let form = form.clone();
        props
            .on_command
            .reform(move |_: MouseEvent| Command::ConfigSubmitted((*form).clone()))
    };

    html! {
        <details class="collapse collapse-arrow bg-base-200">
            <summary class="collapse-title" onclick={on_load}>{"Settings"}</summary>
            <div class="collapse-content flex flex-col gap-2">
                {text_field("Steam library path", form.steam_library_path.clone(), |f, v| f.steam_library_path = v)}
                {text_field("Steam userdata path", form.steam_userdata_path.clone(), |f, v| f.steam_userdata_path = v)}
                {text_field("Port", form.port.clone(), |f, v| f.port = v)}
                <label class="label cursor-pointer justify-start gap-2">
                    <input type="checkbox" class="toggle toggle-sm" checked={form.debug} onchange={on_debug} />
                    <span class="label-text">{"Debug mode"}</span>
                </label>
                <button class="btn btn-primary btn-sm self-start" onclick={on_save}>{"Save"}</button>
            </div>
        </details>
    }
}
