mod actions;
mod config;

use config::{Config, Opts};
use srcinfo::{cli::WRITER, debug, due_to, error};

use anyhow::Result;
use clap::Parser;

/// Exit codes:
/// 1 => program screwed up
fn main() {
    if let Err(err) = try_main() {
        error!("{}", err.to_string());
        err.chain().skip(1).for_each(|cause| {
            due_to!("{}", cause);
        });
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let opts = Opts::parse();
    WRITER.set_verbose(opts.verbose);

    let config = Config::from_file(&opts.config)?;
    // Refuse to work with a registry that can't tell recipe locations apart
    let registry = config.registry()?;
    debug!(
        "Running on {} with {} registry entries",
        config.os(),
        registry.entries().len()
    );

    actions::fullfill_command(&config, &opts, &registry)
}
