//! `lakehouse-ctl render`: print an artifact to stdout.

use lakehouse_sdk::render::{render_readme, render_spark_init};

use crate::cli_config::CliConfig;
use crate::error::CtlResult;
use crate::output;
use crate::RenderTarget;

pub(crate) fn handle_render_command(target: RenderTarget, config: &CliConfig) -> CtlResult<()> {
    let content = match target {
        RenderTarget::Init => render_spark_init(&super::profile_from(config))?,
        RenderTarget::Readme => render_readme()?,
    };
    output::raw(&content);
    Ok(())
}
