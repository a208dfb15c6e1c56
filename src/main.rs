use ascii_wallpaper::cli::{handle_config_action, run_convert, Args, Command};
use clap::Parser;

fn main() {
    let args = Args::parse();

    if let Some(Command::Config { action }) = &args.command {
        handle_config_action(action.clone(), args.config.as_deref());
        return;
    }

    if let Err(e) = run_convert(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
