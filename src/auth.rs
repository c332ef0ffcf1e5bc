//! Portal credentials and endpoint URL construction.

use std::fmt;

use url::Url;

use crate::error::Error;

/// How the client authenticates against a portal.
///
/// Webhook URLs embed an inbound-webhook secret
/// (`https://{portal}/rest/{user_id}/{secret}/`); OAuth uses the portal's
/// plain `/rest/` endpoint with an access token passed as the `auth` query
/// parameter. Either way the secret never shows up in `Debug` output.
pub struct Credentials {
    inner: Inner,
}

enum Inner {
    Webhook { url: Url },
    OAuth { base_url: Url, access_token: String },
}

impl Credentials {
    /// Credentials from an inbound webhook URL.
    pub fn webhook(url: &str) -> Result<Self, Error> {
        Ok(Self {
            inner: Inner::Webhook {
                url: parse_base(url)?,
            },
        })
    }

    /// Credentials from a portal URL and an OAuth access token. `portal_url`
    /// may be the bare portal (`https://example.bitrix24.com`) or its `/rest/`
    /// endpoint.
    pub fn oauth(portal_url: &str, access_token: impl Into<String>) -> Result<Self, Error> {
        let mut base_url = parse_base(portal_url)?;
        if !base_url.path().ends_with("/rest/") {
            base_url = base_url
                .join("rest/")
                .map_err(|e| Error::InvalidUrl(e.to_string()))?;
        }
        Ok(Self {
            inner: Inner::OAuth {
                base_url,
                access_token: access_token.into(),
            },
        })
    }

    /// The endpoint for a REST method, e.g. `{base}/crm.lead.list.json`.
    pub(crate) fn method_url(&self, method: &str) -> Result<Url, Error> {
        if method.is_empty() {
            return Err(Error::InvalidUrl("empty method name".to_string()));
        }
        let (base, auth) = match &self.inner {
            Inner::Webhook { url } => (url, None),
            Inner::OAuth {
                base_url,
                access_token,
            } => (base_url, Some(access_token.as_str())),
        };
        let mut url = base
            .join(&format!("{}.json", method))
            .map_err(|e| Error::InvalidUrl(e.to_string()))?;
        if let Some(token) = auth {
            url.query_pairs_mut().append_pair("auth", token);
        }
        Ok(url)
    }

    /// The portal host, for logging.
    pub fn portal(&self) -> &str {
        let url = match &self.inner {
            Inner::Webhook { url } => url,
            Inner::OAuth { base_url, .. } => base_url,
        };
        url.host_str().unwrap_or_default()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match &self.inner {
            Inner::Webhook { .. } => "Credentials::Webhook",
            Inner::OAuth { .. } => "Credentials::OAuth",
        };
        f.debug_struct(name)
            .field("portal", &self.portal())
            .finish_non_exhaustive()
    }
}

fn parse_base(url: &str) -> Result<Url, Error> {
    let mut url = Url::parse(url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::InvalidUrl(format!("unsupported scheme: {}", other)));
        }
    }
    // Url::join treats a base without a trailing slash as a file path and
    // would drop its last segment.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
