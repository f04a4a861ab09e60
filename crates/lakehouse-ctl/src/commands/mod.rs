//! Command handlers for `lakehouse-ctl`.

pub(crate) mod generate;
pub(crate) mod render;
pub(crate) mod settings;

pub(crate) use generate::handle_generate_command;
pub(crate) use render::handle_render_command;
pub(crate) use settings::handle_settings_command;

use lakehouse_sdk::session::SessionProfile;

use crate::cli_config::CliConfig;

pub(crate) fn profile_from(config: &CliConfig) -> SessionProfile {
    SessionProfile::from_settings(&config.profile_settings())
}
