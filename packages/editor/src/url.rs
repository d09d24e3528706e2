//! URL recognition for auto-linking pasted text

use regex::Regex;
use std::sync::OnceLock;

fn protocol_and_domain() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:\w+:)?//(\S+)$").unwrap())
}

fn localhost_domain() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^localhost[:?\d]*(?:[^:?\d]\S*)?$").unwrap())
}

fn non_localhost_domain() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s.]+\.\S{2,}$").unwrap())
}

/// Schemeless host: dotted labels ending in an alphabetic TLD, then an
/// optional port and path
fn bare_domain() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+([A-Za-z]{2,})(?::\d+)?([/?#]\S*)?$")
            .unwrap()
    })
}

/// Extensions that make a bare `name.ext` read as a file name
const FILE_EXTENSIONS: [&str; 16] = [
    "txt", "md", "json", "toml", "yaml", "yml", "csv", "pdf", "doc", "docx", "png", "jpg", "jpeg", "gif",
    "html", "zip",
];

/// `scheme://host...`, `//host...`, or a bare `label.tld...` domain
pub fn is_url(text: &str) -> bool {
    if text.is_empty() || text.chars().any(char::is_whitespace) {
        return false;
    }

    if let Some(caps) = protocol_and_domain().captures(text) {
        let rest = &caps[1];
        return localhost_domain().is_match(rest) || non_localhost_domain().is_match(rest);
    }

    if text.contains("//") {
        return false;
    }
    let Some(caps) = bare_domain().captures(text) else {
        return false;
    };
    let has_path = caps.get(2).is_some();
    has_path || !FILE_EXTENSIONS.contains(&caps[1].to_ascii_lowercase().as_str())
}
