//! replwork binary entry point.

use replwork::ui::output;

fn main() {
    if let Err(err) = replwork::cli::run() {
        output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
