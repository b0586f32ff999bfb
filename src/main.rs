//! e2spy main entrypoint.

use e2spy::run;
use e2spy::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
