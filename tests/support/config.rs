//! Temporary config files.

use std::io::Write;

use tempfile::NamedTempFile;

pub const SECRET: &str = "0123456789abcdef0123456789abcdef";

/// Write `contents` to a temporary `.toml` file kept alive by the handle.
pub fn temp_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("fundless-config-")
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

/// Config running only the dashboard on the paper account.
pub const DASHBOARD_ONLY: &str = r#"
[telegram]
enabled = false

[savings_plan]
cost = 250
base_symbol = "eur"
exchange = "Kraken"

[dashboard]
bind = "127.0.0.1:0"
secret_key = "0123456789abcdef0123456789abcdef"

[paper]
cash = 1000

[[paper.assets]]
symbol = "btc"
amount = 0.02
price = 40000
index_weight = 0.8

[[paper.assets]]
symbol = "eth"
amount = 0.5
price = 2000
index_weight = 0.2
"#;
