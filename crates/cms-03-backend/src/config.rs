//! Backend connection configuration.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::error::BackendError;

/// Default bucket for project, news and about media.
pub const DEFAULT_MEDIA_BUCKET: &str = "uploads";

/// Default bucket for header logos.
pub const DEFAULT_IMAGES_BUCKET: &str = "images";

/// Default TCP connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Where the hosted backend lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://abc.supabase.co`. No trailing slash.
    pub url: String,
    /// Public anonymous key sent as `apikey` on every request.
    pub anon_key: String,
    pub media_bucket: String,
    pub images_bucket: String,
    pub connect_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            media_bucket: DEFAULT_MEDIA_BUCKET.to_string(),
            images_bucket: DEFAULT_IMAGES_BUCKET.to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl BackendConfig {
    /// Configuration for a project URL and key, other settings defaulted.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Variable | Fallback | Default |
    /// |----------|----------|---------|
    /// | `CMS_BACKEND_URL` | `SUPABASE_URL` | required |
    /// | `CMS_BACKEND_ANON_KEY` | `SUPABASE_ANON_KEY` | required |
    /// | `CMS_MEDIA_BUCKET` | | `uploads` |
    /// | `CMS_IMAGES_BUCKET` | | `images` |
    /// | `CMS_CONNECT_TIMEOUT_SECS` | | `10` |
    pub fn from_env() -> Result<Self, BackendError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BackendError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let url = non_empty("CMS_BACKEND_URL")
            .or_else(|| non_empty("SUPABASE_URL"))
            .ok_or(BackendError::MissingConfig("CMS_BACKEND_URL"))?;
        let anon_key = non_empty("CMS_BACKEND_ANON_KEY")
            .or_else(|| non_empty("SUPABASE_ANON_KEY"))
            .ok_or(BackendError::MissingConfig("CMS_BACKEND_ANON_KEY"))?;

        let connect_timeout_secs = match non_empty("CMS_CONNECT_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                BackendError::InvalidConfig(format!("CMS_CONNECT_TIMEOUT_SECS: {raw}"))
            })?,
            None => DEFAULT_CONNECT_TIMEOUT_SECS,
        };

        let config = Self {
            media_bucket: non_empty("CMS_MEDIA_BUCKET")
                .unwrap_or_else(|| DEFAULT_MEDIA_BUCKET.to_string()),
            images_bucket: non_empty("CMS_IMAGES_BUCKET")
                .unwrap_or_else(|| DEFAULT_IMAGES_BUCKET.to_string()),
            connect_timeout_secs,
            ..Self::new(url.trim(), anon_key.trim())
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be used to build a client.
    pub fn validate(&self) -> Result<(), BackendError> {
        if self.url.is_empty() {
            return Err(BackendError::MissingConfig("CMS_BACKEND_URL"));
        }
        if self.anon_key.is_empty() {
            return Err(BackendError::MissingConfig("CMS_BACKEND_ANON_KEY"));
        }
        if !(self.url.starts_with("https://") || self.url.starts_with("http://")) {
            return Err(BackendError::InvalidConfig(format!(
                "backend url must start with http:// or https://, got {}",
                self.url
            )));
        }
        if self.media_bucket.is_empty() || self.images_bucket.is_empty() {
            return Err(BackendError::InvalidConfig("bucket names must not be empty".into()));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// `<url>/rest/v1/<table>`
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base(), table)
    }

    /// `<url>/storage/v1/object/<bucket>`
    pub fn bucket_url(&self, bucket: &str) -> String {
        format!("{}/storage/v1/object/{}", self.base(), bucket)
    }

    /// `<url>/storage/v1/object/<bucket>/<path>`
    pub fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{}", self.bucket_url(bucket), path.trim_start_matches('/'))
    }

    /// `<url>/storage/v1/object/public/<bucket>/<path>`
    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base(),
            bucket,
            path.trim_start_matches('/')
        )
    }

    /// `<url>/auth/v1/<endpoint>`
    pub fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.base(), endpoint)
    }

    fn base(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = BackendConfig::from_lookup(lookup(&[
            ("CMS_BACKEND_URL", "https://abc.supabase.co/"),
            ("CMS_BACKEND_ANON_KEY", "anon"),
        ]))
        .unwrap();

        assert_eq!(config.url, "https://abc.supabase.co");
        assert_eq!(config.media_bucket, "uploads");
        assert_eq!(config.images_bucket, "images");
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_supabase_names_are_fallbacks() {
        let config = BackendConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://legacy.supabase.co"),
            ("SUPABASE_ANON_KEY", "legacy"),
            ("CMS_BACKEND_ANON_KEY", "primary"),
        ]))
        .unwrap();

        assert_eq!(config.url, "https://legacy.supabase.co");
        assert_eq!(config.anon_key, "primary");
    }

    #[test]
    fn test_missing_url_refuses_to_start() {
        let err = BackendConfig::from_lookup(lookup(&[("CMS_BACKEND_ANON_KEY", "anon")]))
            .unwrap_err();
        assert!(matches!(err, BackendError::MissingConfig("CMS_BACKEND_URL")));

        let err = BackendConfig::from_lookup(lookup(&[
            ("CMS_BACKEND_URL", "https://abc.supabase.co"),
            ("CMS_BACKEND_ANON_KEY", "  "),
        ]))
        .unwrap_err();
        assert!(matches!(err, BackendError::MissingConfig("CMS_BACKEND_ANON_KEY")));
    }

    #[test]
    fn test_validate_rejects_bad_scheme_and_timeout() {
        let err = BackendConfig::new("ftp://abc", "anon").validate().unwrap_err();
        assert!(matches!(err, BackendError::InvalidConfig(_)));

        let err = BackendConfig::from_lookup(lookup(&[
            ("CMS_BACKEND_URL", "https://abc.supabase.co"),
            ("CMS_BACKEND_ANON_KEY", "anon"),
            ("CMS_CONNECT_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, BackendError::InvalidConfig(_)));
    }

    #[test]
    fn test_endpoint_urls() {
        let config = BackendConfig::new("https://abc.supabase.co", "anon");

        assert_eq!(config.rest_url("projects"), "https://abc.supabase.co/rest/v1/projects");
        assert_eq!(
            config.object_url("uploads", "/news-1.png"),
            "https://abc.supabase.co/storage/v1/object/uploads/news-1.png"
        );
        assert_eq!(
            config.public_object_url("images", "header/logo-5.svg"),
            "https://abc.supabase.co/storage/v1/object/public/images/header/logo-5.svg"
        );
        assert_eq!(
            config.auth_url("token?grant_type=password"),
            "https://abc.supabase.co/auth/v1/token?grant_type=password"
        );
    }
}
