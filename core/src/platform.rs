use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Judge a problem link belongs to. Anything not recognised is `Unknown`
/// rather than being folded into one of the known judges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    LeetCode,
    Codeforces,
    Unknown,
}

const LEETCODE_HOSTS: &[&str] = &["leetcode.com", "leetcode.cn"];
const CODEFORCES_HOSTS: &[&str] = &["codeforces.com"];

fn host_matches(host: &str, domains: &[&str]) -> bool {
    domains.iter().any(|d| host == *d || host.ends_with(&format!(".{d}")))
}

impl Platform {
    pub fn classify(url: &str) -> Platform {
        let host = match Url::parse(url.trim()) {
            Ok(parsed) => match parsed.host_str() {
                Some(h) => h.to_ascii_lowercase(),
                None => return Platform::Unknown,
            },
            Err(_) => return Platform::Unknown,
        };
        if host_matches(&host, LEETCODE_HOSTS) {
            Platform::LeetCode
        } else if host_matches(&host, CODEFORCES_HOSTS) {
            Platform::Codeforces
        } else {
            Platform::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::LeetCode => "LeetCode",
            Platform::Codeforces => "Codeforces",
            Platform::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}
