pub const UPSTASH_URL_VAR: &str = "UPSTASH_REDIS_REST_URL";
pub const UPSTASH_TOKEN_VAR: &str = "UPSTASH_REDIS_REST_TOKEN";
pub const KV_URL_VAR: &str = "KV_REST_API_URL";
pub const KV_TOKEN_VAR: &str = "KV_REST_API_TOKEN";

/// Recognized endpoint/credential pairs, in precedence order. The hosting
/// platform may inject either naming convention for the same store.
const ENV_PAIRS: [(&str, &str); 2] = [
    (UPSTASH_URL_VAR, UPSTASH_TOKEN_VAR),
    (KV_URL_VAR, KV_TOKEN_VAR),
];

/// Resolved location of the backing vote store. `None` from the resolvers
/// below means no store is configured and no client may be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    pub token: String,
}

impl StoreConfig {
    pub fn from_env() -> Option<Self> {
        Self::resolve(|name| std::env::var(name).ok())
    }

    /// The first pair with both halves present and non-empty wins.
    pub fn resolve<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        ENV_PAIRS.iter().find_map(|(url_var, token_var)| {
            let url = lookup(url_var).filter(|v| !v.is_empty())?;
            let token = lookup(token_var).filter(|v| !v.is_empty())?;
            Some(StoreConfig { url, token })
        })
    }

    /// Connection URL for the Redis protocol, derived from the REST endpoint
    /// and token. Values that are already redis URLs pass through untouched.
    pub fn connection_url(&self) -> String {
        if self.url.starts_with("redis://") || self.url.starts_with("rediss://") {
            return self.url.clone();
        }
        let host = self
            .url
            .strip_prefix("https://")
            .or_else(|| self.url.strip_prefix("http://"))
            .unwrap_or(&self.url)
            .trim_end_matches('/');
        format!("rediss://default:{}@{}", self.token, host)
    }
}
