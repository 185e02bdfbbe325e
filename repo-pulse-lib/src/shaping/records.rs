//! Provider response records
//!
//! Only the fields the payload uses are declared. Every field is optional so that
//! missing or `null` values decode to `None`; a value of the wrong JSON type is a
//! decode error.

use serde::Deserialize;

/// Repository metadata from `/repos/{owner}/{repo}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RepositoryRecord {
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    /// Issues and pull requests combined; GitHub does not report them separately here.
    pub open_issues_count: Option<u64>,
    pub subscribers_count: Option<u64>,
    pub size: Option<u64>,
    pub language: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub default_branch: Option<String>,
    pub description: Option<String>,
}

/// One entry of `/repos/{owner}/{repo}/commits`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommitRecord {
    pub sha: Option<String>,
    pub commit: Option<CommitDetail>,
    /// The linked account; `null` when the commit email maps to no account.
    pub author: Option<AccountRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommitDetail {
    pub message: Option<String>,
    pub author: Option<CommitSignature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommitSignature {
    pub name: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccountRecord {
    pub login: Option<String>,
    pub avatar_url: Option<String>,
}

/// One entry of `/repos/{owner}/{repo}/releases`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReleaseRecord {
    pub tag_name: Option<String>,
    pub name: Option<String>,
    pub published_at: Option<String>,
    pub html_url: Option<String>,
}

/// One entry of `/repos/{owner}/{repo}/contributors`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContributorRecord {
    pub login: Option<String>,
    pub avatar_url: Option<String>,
    pub contributions: Option<u64>,
    pub html_url: Option<String>,
}

/// Response of `/downloads/range/{period}/{package}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DownloadRange {
    pub downloads: Option<Vec<DailyDownloads>>,
}

/// A single day of a download range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DailyDownloads {
    pub day: Option<String>,
    pub downloads: Option<u64>,
}

/// Response of `/downloads/point/{period}/{package}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PointDownloads {
    pub downloads: Option<u64>,
}

/// A commit flattened to the fields shaping works with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCommit {
    pub sha: Option<String>,
    pub message_first_line: Option<String>,
    pub author_login: Option<String>,
    pub author_name: Option<String>,
    pub author_date: Option<String>,
    pub avatar_url: Option<String>,
}

impl From<CommitRecord> for RawCommit {
    fn from(record: CommitRecord) -> Self {
        let (message, signature) = record
            .commit
            .map(|c| (c.message, c.author))
            .unwrap_or_default();
        let signature = signature.unwrap_or_default();
        let account = record.author.unwrap_or_default();

        Self {
            sha: record.sha,
            message_first_line: message.and_then(|m| m.lines().next().map(str::to_string)),
            author_login: account.login,
            author_name: signature.name,
            author_date: signature.date,
            avatar_url: account.avatar_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_deserialize() {
        let json = r#"{
            "stargazers_count": 1000,
            "forks_count": 200,
            "open_issues_count": 31,
            "subscribers_count": 50,
            "size": 20480,
            "language": "TypeScript",
            "created_at": "2023-05-01T10:00:00Z",
            "updated_at": "2024-06-01T10:00:00Z",
            "default_branch": "main",
            "description": "An example"
        }"#;

        let repo: RepositoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(repo.stargazers_count, Some(1000));
        assert_eq!(repo.open_issues_count, Some(31));
        assert_eq!(repo.language.as_deref(), Some("TypeScript"));
    }

    #[test]
    fn test_repository_deserialize_missing_and_null_fields() {
        let json = r#"{ "stargazers_count": 5, "description": null }"#;

        let repo: RepositoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(repo.stargazers_count, Some(5));
        assert_eq!(repo.forks_count, None);
        assert_eq!(repo.description, None);
    }

    #[test]
    fn test_repository_rejects_negative_count() {
        let json = r#"{ "stargazers_count": -1 }"#;
        let _ = serde_json::from_str::<RepositoryRecord>(json).unwrap_err();
    }

    #[test]
    fn test_commit_into_raw_commit() {
        let json = r#"{
            "sha": "0123456789abcdef",
            "commit": {
                "message": "Fix the thing\n\nLonger body",
                "author": { "name": "Jane Doe", "date": "2024-01-02T03:04:05Z" }
            },
            "author": { "login": "jdoe", "avatar_url": "https://avatars.example/jdoe" }
        }"#;

        let record: CommitRecord = serde_json::from_str(json).unwrap();
        let raw = RawCommit::from(record);

        assert_eq!(raw.sha.as_deref(), Some("0123456789abcdef"));
        assert_eq!(raw.message_first_line.as_deref(), Some("Fix the thing"));
        assert_eq!(raw.author_login.as_deref(), Some("jdoe"));
        assert_eq!(raw.author_name.as_deref(), Some("Jane Doe"));
        assert_eq!(raw.author_date.as_deref(), Some("2024-01-02T03:04:05Z"));
        assert_eq!(raw.avatar_url.as_deref(), Some("https://avatars.example/jdoe"));
    }

    #[test]
    fn test_commit_without_linked_account() {
        let json = r#"{
            "sha": "abc",
            "commit": { "message": "Initial", "author": { "name": "Ghost", "date": "2024-01-01T00:00:00Z" } },
            "author": null
        }"#;

        let raw = RawCommit::from(serde_json::from_str::<CommitRecord>(json).unwrap());
        assert_eq!(raw.author_login, None);
        assert_eq!(raw.avatar_url, None);
        assert_eq!(raw.author_name.as_deref(), Some("Ghost"));
    }

    #[test]
    fn test_commit_with_crlf_message() {
        let json = r#"{ "commit": { "message": "Windows line\r\nsecond" } }"#;
        let raw = RawCommit::from(serde_json::from_str::<CommitRecord>(json).unwrap());
        assert_eq!(raw.message_first_line.as_deref(), Some("Windows line"));
    }

    #[test]
    fn test_download_range_deserialize() {
        let json = r#"{
            "start": "2024-01-01",
            "end": "2024-01-02",
            "package": "openclaw",
            "downloads": [
                { "day": "2024-01-01", "downloads": 10 },
                { "day": "2024-01-02", "downloads": 12 }
            ]
        }"#;

        let range: DownloadRange = serde_json::from_str(json).unwrap();
        let days = range.downloads.unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(
            days[1],
            DailyDownloads {
                day: Some("2024-01-02".into()),
                downloads: Some(12)
            }
        );
    }

    #[test]
    fn test_download_range_tolerates_null_days() {
        let json = r#"{ "downloads": [{ "day": "2024-01-01", "downloads": null }, { "downloads": 4 }] }"#;

        let days = serde_json::from_str::<DownloadRange>(json).unwrap().downloads.unwrap();
        assert_eq!(days[0].downloads, None);
        assert_eq!(days[1].day, None);
        assert_eq!(days[1].downloads, Some(4));
    }

    #[test]
    fn test_point_downloads_error_body() {
        let json = r#"{ "error": "package openclaw not found" }"#;
        let point: PointDownloads = serde_json::from_str(json).unwrap();
        assert_eq!(point.downloads, None);
    }
}
