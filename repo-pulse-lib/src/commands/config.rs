use crate::Result;
use crate::collector::Sources;
use crate::providers::{GITHUB_BASE_URL, NPM_BASE_URL, RepoSlug};
use crate::server::CacheHeaders;
use camino::Utf8Path;
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "repo-pulse.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Repository reported in full (statistics, commits, releases, contributors)
    #[serde(default = "default_primary_repo")]
    pub primary_repo: RepoSlug,

    /// Repository reported by stars and forks only
    #[serde(default = "default_secondary_repo")]
    pub secondary_repo: RepoSlug,

    /// npm package whose downloads are reported
    #[serde(default = "default_package")]
    pub package: String,

    #[serde(default = "default_hosting_base_url")]
    pub hosting_base_url: String,

    #[serde(default = "default_registry_base_url")]
    pub registry_base_url: String,

    /// How long an assembled payload is served before providers are queried again
    #[serde(default = "default_cache_ttl", with = "humantime_serde")]
    pub cache_ttl: Duration,

    /// Advertised `stale-while-revalidate` window for fresh payloads
    #[serde(default = "default_stale_while_revalidate", with = "humantime_serde")]
    pub stale_while_revalidate: Duration,

    /// Advertised `max-age` for stale payloads
    #[serde(default = "default_stale_max_age", with = "humantime_serde")]
    pub stale_max_age: Duration,

    /// Address the HTTP server binds to
    #[serde(default = "default_listen")]
    pub listen: String,
}

fn default_primary_repo() -> RepoSlug {
    RepoSlug::new("openclaw", "openclaw")
}

fn default_secondary_repo() -> RepoSlug {
    RepoSlug::new("openclaw", "skills")
}

fn default_package() -> String {
    "openclaw".to_string()
}

fn default_hosting_base_url() -> String {
    GITHUB_BASE_URL.to_string()
}

fn default_registry_base_url() -> String {
    NPM_BASE_URL.to_string()
}

const fn default_cache_ttl() -> Duration {
    Duration::from_mins(5)
}

const fn default_stale_while_revalidate() -> Duration {
    Duration::from_mins(10)
}

const fn default_stale_max_age() -> Duration {
    Duration::from_mins(1)
}

fn default_listen() -> String {
    "127.0.0.1:3000".to_string()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// With no explicit path, `repo-pulse.toml` in `base_dir` is used if it exists.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.to_path_buf(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Check values the type system doesn't already enforce
    pub fn validate(&self) -> Result<()> {
        if self.package.trim().is_empty() {
            return Err(app_err!("package must not be empty"));
        }

        if self.cache_ttl.is_zero() {
            return Err(app_err!("cache_ttl must be greater than zero"));
        }

        for (key, url) in [("hosting_base_url", &self.hosting_base_url), ("registry_base_url", &self.registry_base_url)] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(app_err!("{key} must be an http or https URL, got '{url}'"));
            }
        }

        if self.listen.trim().is_empty() {
            return Err(app_err!("listen must not be empty"));
        }

        Ok(())
    }

    #[must_use]
    pub fn sources(&self) -> Sources {
        Sources {
            primary_repo: self.primary_repo.clone(),
            secondary_repo: self.secondary_repo.clone(),
            package: self.package.clone(),
        }
    }

    #[must_use]
    pub const fn cache_headers(&self) -> CacheHeaders {
        CacheHeaders {
            max_age: self.cache_ttl,
            stale_while_revalidate: self.stale_while_revalidate,
            stale_max_age: self.stale_max_age,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primary_repo: default_primary_repo(),
            secondary_repo: default_secondary_repo(),
            package: default_package(),
            hosting_base_url: default_hosting_base_url(),
            registry_base_url: default_registry_base_url(),
            cache_ttl: default_cache_ttl(),
            stale_while_revalidate: default_stale_while_revalidate(),
            stale_max_age: default_stale_max_age(),
            listen: default_listen(),
        }
    }
}
