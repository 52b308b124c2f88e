use std::fs;

const DEFAULT_CONFIG: &str = "src/default_config.toml";

fn main() {
    println!("cargo:rerun-if-changed={DEFAULT_CONFIG}");

    let content = fs::read_to_string(DEFAULT_CONFIG).expect("Failed to read default_config.toml");

    // Catch syntax errors and a missing [paths] table before the crate embeds the file
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {e}"),
    };
    if !table.get("paths").is_some_and(toml::Value::is_table) {
        panic!("default_config.toml must define a [paths] table");
    }
}
