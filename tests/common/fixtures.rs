//! Catalog payload fixtures and feed file helpers

use serde_json::{Value, json};
use std::path::Path;

/// Details payload with every optional field populated
pub fn full_details(name: &str) -> Value {
    json!({
        "name": name,
        "projectWebsite": format!("https://example.com/{}", name.to_lowercase()),
        "shortDescription": format!("{} container images", name),
        "lastModifiedDate": "2024-05-14T17:48:11.5218382Z",
        "categories": ["featured", "tools"]
    })
}

/// Details payload with only the required name
pub fn minimal_details(name: &str) -> Value {
    json!({ "name": name })
}

/// Tag list payload with one tag per name, in order
pub fn tag_list(names: &[&str]) -> Value {
    Value::Array(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                json!({
                    "name": name,
                    "createdDate": format!("2024-01-{:02}T00:00:00Z", i + 1),
                    "lastModifiedDate": format!("2024-02-{:02}T00:00:00Z", i + 1)
                })
            })
            .collect(),
    )
}

/// Write a repository list file with one identifier per line
pub fn write_repo_list(path: &Path, repos: &[&str]) {
    let mut content = repos.join("\n");
    content.push('\n');
    std::fs::write(path, content).expect("Failed to write repository list");
}

/// Parse a written feed file
pub fn read_feed(path: &Path) -> rss::Channel {
    let bytes = std::fs::read(path).expect("Failed to read feed file");
    rss::Channel::read_from(&bytes[..]).expect("Feed file is not valid RSS")
}
