use std::env;

const HELP_TEXT: &str = include_str!("./cli-help.txt");

/// Settings that are safe to echo to the terminal. Key ids and secrets are deliberately absent.
const PUBLIC_SETTINGS: [&str; 8] = [
    "RUST_LOG",
    "SFP_HOST",
    "SFP_PORT",
    "SFP_DATABASE_URL",
    "SFP_CURRENCY",
    "SFP_RUN_MIGRATIONS",
    "SFP_RAZORPAY_API_URL",
    "SFP_RAZORPAY_TIMEOUT_SECS",
];

/// The server is configured through the environment only. Any argument on the command line prints usage plus the
/// current public settings, and returns `true` so that the caller exits instead of starting the server.
pub fn handle_command_line_args() -> bool {
    if env::args().len() <= 1 {
        return false;
    }
    println!("\n{HELP_TEXT}\n");
    println!("Current settings (secrets are never shown):");
    for line in settings_report(|name| env::var(name).ok()) {
        println!("{line}");
    }
    true
}

fn settings_report<F>(lookup: F) -> Vec<String>
where F: Fn(&str) -> Option<String> {
    PUBLIC_SETTINGS
        .iter()
        .map(|&name| {
            let value = lookup(name).unwrap_or_else(|| "<unset>".to_string());
            format!("  {name:<30} {value}")
        })
        .collect()
}
