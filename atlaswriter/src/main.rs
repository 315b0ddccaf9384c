use atlaswriter::{Args, atlaswriter};
use clap::Parser;
use log::{error, info};
use simple_logger::init_with_level;

fn main() {
    let args = Args::parse();

    init_with_level(args.level).unwrap_or_else(|e| panic!("{}", e));
    info!("Starting atlaswriter with args: {}", args);

    if let Err(e) = atlaswriter(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
