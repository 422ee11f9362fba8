use std::{env, path::PathBuf};

const CONFIG_KEYS: [&str; 5] = [
    "DASHBOARD_BACKEND_URL",
    "DASHBOARD_LOG_LIMIT",
    "DASHBOARD_LOGS_INTERVAL_SECS",
    "DASHBOARD_STATS_INTERVAL_SECS",
    "DASHBOARD_MAX_CHAT_MESSAGES",
];

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let env_path = PathBuf::from(&manifest_dir).join(".env");

    println!("cargo:rerun-if-changed={}", env_path.display());
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    if !env_path.exists() {
        return;
    }

    for item in dotenvy::from_path_iter(&env_path).expect("Failed to read .env file") {
        let (key, val) = item.expect("Failed to parse .env entry");
        // A value exported in the shell wins over the .env file.
        if CONFIG_KEYS.contains(&key.as_str()) && env::var(&key).is_err() {
            println!("cargo:rustc-env={}={}", key, val);
        }
    }
}
