mod app;
mod cli;
mod effects;
mod persistence;
mod render;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    wizard_logging::initialize(args.log_destination(), args.log_level(), &args.log_file);
    app::run(args)
}
