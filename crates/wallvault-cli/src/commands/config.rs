use wallvault_api_models::ConfigForm;

use crate::cli::ConfigSetArgs;
use crate::client::{AppContext, CliResult};
use crate::output::render_config;

pub(crate) async fn handle_config_get(ctx: &mut AppContext) -> CliResult<()> {
    let config = ctx.controller.load_config().await?;
    render_config(&config, ctx.output)
}

pub(crate) async fn handle_config_set(ctx: &mut AppContext, args: ConfigSetArgs) -> CliResult<()> {
    let current = ctx.controller.load_config().await?;
    let form = merge_overrides(ConfigForm::from_config(&current), args);
    let saved = ctx.controller.save_config(&form).await?;
    println!("Configuration saved");
    render_config(&saved, ctx.output)
}

fn merge_overrides(mut form: ConfigForm, args: ConfigSetArgs) -> ConfigForm {
    if let Some(path) = args.library_path {
        form.steam_library_path = path;
    }
    if let Some(path) = args.userdata_path {
        form.steam_userdata_path = path;
    }
    if let Some(port) = args.port {
        form.port = port;
    }
    if let Some(debug) = args.debug {
        form.debug = debug;
    }
    form
}
