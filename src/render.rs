//! Plain-text rendering of API results for the command line.

use chrono::DateTime;
use serde_json::Value;
use std::collections::BTreeMap;

/// `owner/name  description` for a repository descriptor.
///
/// Falls back to compact JSON when the descriptor has no usable name.
pub fn repo_line(repo: &Value) -> String {
    let name = repo
        .get("full_name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| {
            let name = repo.get("name").and_then(Value::as_str)?;
            let owner = repo.get("owner").and_then(|owner| {
                owner
                    .as_str()
                    .or_else(|| owner.get("login").and_then(Value::as_str))
            });
            Some(match owner {
                Some(owner) => format!("{}/{}", owner, name),
                None => name.to_string(),
            })
        });

    match name {
        Some(name) => match repo.get("description").and_then(Value::as_str) {
            Some(desc) if !desc.trim().is_empty() => format!("{}  {}", name, desc.trim()),
            _ => name,
        },
        None => repo.to_string(),
    }
}

/// `abc1234 2024-01-31 subject` for a commit descriptor.
pub fn commit_line(commit: &Value) -> String {
    let sha = commit.get("sha").and_then(Value::as_str).unwrap_or("");
    let short_sha: String = sha.chars().take(7).collect();

    let details = commit.get("commit");
    let date = details
        .and_then(|c| c.get("author"))
        .and_then(|a| a.get("date"))
        .and_then(Value::as_str)
        .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "----------".to_string());
    let subject = details
        .and_then(|c| c.get("message"))
        .and_then(Value::as_str)
        .and_then(|m| m.lines().next())
        .unwrap_or("");

    format!("{} {} {}", short_sha, date, subject)
}

/// One `name<TAB>url` line per listing entry, directories first.
pub fn listing_lines(listing: &BTreeMap<String, String>) -> Vec<String> {
    let (dirs, files): (Vec<_>, Vec<_>) = listing.iter().partition(|(name, _)| name.ends_with('/'));
    dirs.into_iter()
        .chain(files)
        .map(|(name, url)| format!("{}\t{}", name, url))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn repo_line_prefers_full_name() {
        let repo = json!({"full_name": "octo/hello", "name": "hello", "description": " Hi "});
        assert_eq!(repo_line(&repo), "octo/hello  Hi");
    }

    #[test]
    fn repo_line_builds_name_from_legacy_fields() {
        let repo = json!({"owner": "octo", "name": "hello", "description": ""});
        assert_eq!(repo_line(&repo), "octo/hello");

        let repo = json!({"owner": {"login": "octo"}, "name": "hello"});
        assert_eq!(repo_line(&repo), "octo/hello");
    }

    #[test]
    fn repo_line_falls_back_to_json() {
        let repo = json!({"id": 1});
        assert_eq!(repo_line(&repo), r#"{"id":1}"#);
    }

    #[test]
    fn commit_line_shows_sha_date_and_subject() {
        let commit = json!({
            "sha": "0123456789abcdef",
            "commit": {
                "author": {"date": "2024-01-31T10:20:30Z"},
                "message": "Fix tree listing\n\nLonger body"
            }
        });
        assert_eq!(commit_line(&commit), "0123456 2024-01-31 Fix tree listing");
    }

    #[test]
    fn commit_line_tolerates_missing_fields() {
        assert_eq!(commit_line(&json!({"sha": "abc"})), "abc ---------- ");
    }

    #[test]
    fn listing_puts_directories_first() {
        let mut listing = BTreeMap::new();
        listing.insert("a.txt".to_string(), "U1".to_string());
        listing.insert("src/".to_string(), "U2".to_string());
        assert_eq!(listing_lines(&listing), vec!["src/\tU2", "a.txt\tU1"]);
    }
}
