//! `lakehouse-ctl settings`: evaluate the session profile against the current
//! environment, as the generated module would at `get_spark_session()` time.

use lakehouse_sdk::host::resolve_host_identity;
use lakehouse_sdk::launch::DRIVER_HOST_VAR;
use lakehouse_sdk::session::SessionOptions;

use crate::cli_config::CliConfig;
use crate::error::CtlResult;
use crate::output;
use crate::SettingsArgs;

pub(crate) async fn handle_settings_command(
    args: SettingsArgs,
    config: &CliConfig,
) -> CtlResult<()> {
    let options = SessionOptions {
        app_name: args.app_name,
        enable_hive: !args.no_hive,
        enable_delta: !args.no_delta,
    };
    // The fallback address only matters when the variable is unset.
    let local_address = match std::env::var(DRIVER_HOST_VAR) {
        Ok(_) => String::new(),
        Err(_) => resolve_host_identity().await?.address.to_string(),
    };

    let session = super::profile_from(config).resolve(
        &options,
        |name| std::env::var(name).ok(),
        &local_address,
    );

    output::header(format!("Spark session \"{}\"", session.app_name));
    for (key, value) in &session.settings {
        output::setting(key, value);
    }
    if session.hive_support {
        output::blank();
        output::hint("Hive support enabled (enableHiveSupport)");
    }

    Ok(())
}
