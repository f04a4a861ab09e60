//! `lakehouse-ctl generate`: the full pipeline.

use lakehouse_sdk::artifacts::ArtifactKind;
use lakehouse_sdk::generator::{Generator, GeneratorOptions};
use lakehouse_sdk::host::HostSource;

use crate::cli_config::CliConfig;
use crate::error::CtlResult;
use crate::output;
use crate::GenerateArgs;

pub(crate) async fn handle_generate_command(
    args: GenerateArgs,
    config: &CliConfig,
) -> CtlResult<()> {
    let options = GeneratorOptions {
        output_dir: config.output_dir(args.output_dir.as_deref()),
        host: HostSource::Local,
        packages: config.packages()?,
        profile: super::profile_from(config),
        export_env: true,
    };
    tracing::debug!(output_dir = %options.output_dir.display(), "Generating notebook artifacts");

    let report = Generator::new(options)
        .run(|artifact| {
            if artifact.kind == ArtifactKind::SparkInit {
                output::plain(format!("{} created at {}", artifact.kind, artifact.path.display()));
            }
        })
        .await?;

    tracing::info!(host = %report.host, files = report.written.len(), "Generation complete");

    if args.print_env {
        output::plain(report.launch.shell_exports());
    }

    Ok(())
}
