//! apigen - typed TypeScript API client generator
//!
//! Reads an OpenAPI-style description from a URL or a file and writes
//! `defaults.ts`, `schemas/` and `services/` into the output directory.

fn main() {
    apigen_cli::init_tracing();
    let code = apigen_cli::run_cli(std::env::args().collect());
    std::process::exit(code);
}
