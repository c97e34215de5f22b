use std::process;

fn main() {
    process::exit(ascend_cli::run());
}
