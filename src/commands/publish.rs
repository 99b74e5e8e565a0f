use std::io::Write;

use crate::{Args, build::Builder, config::Settings};

pub fn run(args: &Args) -> Result<(), anyhow::Error> {
    if let Some(source) = &args.source {
        tracing::warn!(
            source = %source.display(),
            "--source is ignored; the datasets description is always downloaded"
        );
    }

    let settings = Settings::load_from_arg(args.config_file.as_deref())?;

    let builder = Builder::new(settings)?;

    let mut stdout = std::io::stdout().lock();
    let result = builder.build(&mut stdout)?;
    tracing::debug!(history = ?result.history, "run complete");

    writeln!(
        stdout,
        "Published {} ({} bytes) from {}",
        result.destination.display(),
        result.bytes,
        result.source_url
    )?;

    Ok(())
}
