use crate::Result;
use core::fmt::{Display, Formatter};
use ohno::bail;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An `owner/name` repository identifier on the hosting provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoSlug {
    owner: Arc<str>,
    repo: Arc<str>,
}

impl RepoSlug {
    /// Build a slug from parts already known to be well formed.
    #[must_use]
    pub fn new(owner: &str, repo: &str) -> Self {
        Self {
            owner: Arc::from(owner),
            repo: Arc::from(repo),
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim().trim_end_matches(".git");

        let Some((owner, repo)) = s.split_once('/') else {
            bail!("invalid repository '{s}': expected 'owner/name'");
        };

        if owner.is_empty() || repo.is_empty() {
            bail!("invalid repository '{s}': empty owner or repo name");
        }

        if repo.contains('/') {
            bail!("invalid repository '{s}': too many path segments");
        }

        Ok(Self::new(owner, repo))
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl Display for RepoSlug {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl TryFrom<String> for RepoSlug {
    type Error = ohno::AppError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<RepoSlug> for String {
    fn from(slug: RepoSlug) -> Self {
        slug.to_string()
    }
}
