use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Forward .env entries as compile-time variables (read by option_env! in config.rs)
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    // Real environment wins over .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found, using defaults (BACKEND_URL=http://localhost:3000). Copy .env.example to .env to configure.");
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env.example");
    for key in ["BACKEND_URL", "PAGE_SIZE", "LOG_LEVEL", "ENABLE_LOGGING"] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
}
