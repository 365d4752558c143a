// src/commands/version.rs
use std::process::ExitCode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

fn make_version_string() -> String {
    format!(
        "{VERSION} ({} {}-{})",
        profile(),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

pub fn version_string() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(make_version_string)
}

pub fn print_version() -> ExitCode {
    println!("cogen {}", version_string());
    ExitCode::SUCCESS
}
