use std::{env, process};

use signup_wizard::{cli::run_cli, init};

const BUILD_HASH: &str = env!("SIGNUP_WIZARD_BUILD_HASH");
const BUILD_TIMESTAMP: &str = env!("SIGNUP_WIZARD_BUILD_TIMESTAMP");

fn main() {
    if env::args().skip(1).any(|arg| arg == "--version" || arg == "-V") {
        println!(
            "signup_wizard_cli {} ({} built {})",
            env!("CARGO_PKG_VERSION"),
            BUILD_HASH,
            BUILD_TIMESTAMP
        );
        return;
    }

    init();

    if let Err(err) = run_cli() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
