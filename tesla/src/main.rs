use env_logger::Target;
use structopt::StructOpt;
use tesla::CliArgs;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::from_args();

    env_logger::Builder::new()
        .target(Target::Stderr)
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    tesla::run(&args)
}
