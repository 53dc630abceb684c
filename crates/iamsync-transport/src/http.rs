//! Blocking HTTP transport over the identity server's REST management APIs
//!
//! Endpoints, relative to `<url>/t/<tenant>/api/server/v1/<collection>`:
//!
//! | operation | request                                   |
//! |-----------|-------------------------------------------|
//! | list      | `GET ?limit=N` (no limit when unbounded)  |
//! | export    | `GET /{id}/export` with `Accept`          |
//! | import    | `POST /import`, multipart `file`          |
//! | update    | `PUT /{id}/import`, multipart `file`      |
//! | delete    | `DELETE /{id}`                            |

use std::time::Duration;

use iamsync_meta::{ContentFormat, ResourceType, ServerConfig};
use reqwest::Url;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, CONTENT_DISPOSITION};
use tracing::debug;

use crate::content_disposition::file_name_from_content_disposition;
use crate::transport::{ExportedFile, Transport};
use crate::{Error, Result};

#[derive(Debug, Clone)]
enum Auth {
    Bearer(String),
    Basic {
        username: String,
        password: Option<String>,
    },
    Anonymous,
}

/// [`Transport`] backed by `reqwest`'s blocking client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    api_root: Url,
    auth: Auth,
    client: Client,
}

impl HttpTransport {
    /// Build a transport from the server section of the configuration.
    pub fn new(server: &ServerConfig) -> Result<Self> {
        let base = server.url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(Error::Config {
                message: "server.url is not set".to_string(),
            });
        }

        let api_root = Url::parse(&format!("{}/t/{}/api/server/v1", base, server.tenant))
            .map_err(|e| Error::Config {
                message: format!("invalid server URL '{base}': {e}"),
            })?;

        let auth = match (&server.token, &server.username) {
            (Some(token), _) => Auth::Bearer(token.clone()),
            (None, Some(username)) => Auth::Basic {
                username: username.clone(),
                password: server.password.clone(),
            },
            (None, None) => Auth::Anonymous,
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(server.timeout_secs))
            .danger_accept_invalid_certs(server.insecure)
            .user_agent(concat!("iamsync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            api_root,
            auth,
            client,
        })
    }

    /// URL of a resource type's collection, extended by `segments`.
    ///
    /// Segments are percent-encoded, so identifiers containing `/` or
    /// spaces stay a single path segment.
    pub(crate) fn endpoint(&self, resource_type: ResourceType, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_root.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config {
                message: format!("server URL '{}' cannot carry a path", self.api_root),
            })?
            .pop_if_empty()
            .extend(resource_type.api_path().split('/'))
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Auth::Bearer(token) => builder.bearer_auth(token),
            Auth::Basic { username, password } => builder.basic_auth(username, password.as_ref()),
            Auth::Anonymous => builder,
        }
    }

    fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = self.authorize(builder).send()?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            debug!(status = status.as_u16(), url = %response.url(), "Request rejected");
            Err(Error::status(status.as_u16()))
        }
    }

    fn file_form(file_name: &str, content: &str) -> Result<Form> {
        let extension = file_name.rsplit('.').next().unwrap_or_default();
        let format = ContentFormat::from_extension(extension).unwrap_or_default();
        let part = Part::bytes(content.as_bytes().to_vec())
            .file_name(file_name.to_string())
            .mime_str(format.media_type())?;
        Ok(Form::new().part("file", part))
    }
}

impl Transport for HttpTransport {
    fn list(&self, resource_type: ResourceType, page_size: i64) -> Result<Vec<u8>> {
        let mut url = self.endpoint(resource_type, &[])?;
        if page_size >= 0 {
            url.query_pairs_mut()
                .append_pair("limit", &page_size.to_string());
        }
        debug!(%url, "GET list");
        let response = self.send(self.client.get(url))?;
        Ok(response.bytes()?.to_vec())
    }

    fn export(
        &self,
        id: &str,
        format: ContentFormat,
        resource_type: ResourceType,
    ) -> Result<ExportedFile> {
        let url = self.endpoint(resource_type, &[id, "export"])?;
        debug!(%url, media_type = format.media_type(), "GET export");
        let response = self.send(self.client.get(url).header(ACCEPT, format.media_type()))?;

        let header = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .ok_or_else(|| Error::MissingHeader {
                header: CONTENT_DISPOSITION.to_string(),
            })?;
        let disposition = header
            .to_str()
            .map_err(|e| Error::ContentDisposition {
                header: String::from_utf8_lossy(header.as_bytes()).into_owned(),
                reason: e.to_string(),
            })?
            .to_string();
        let file_name = file_name_from_content_disposition(&disposition)?;

        Ok(ExportedFile {
            body: response.bytes()?.to_vec(),
            file_name,
        })
    }

    fn import(&self, file_name: &str, content: &str, resource_type: ResourceType) -> Result<()> {
        let url = self.endpoint(resource_type, &["import"])?;
        debug!(%url, file = file_name, "POST import");
        let form = Self::file_form(file_name, content)?;
        self.send(self.client.post(url).multipart(form))?;
        Ok(())
    }

    fn update(
        &self,
        id: &str,
        file_name: &str,
        content: &str,
        resource_type: ResourceType,
    ) -> Result<()> {
        let url = self.endpoint(resource_type, &[id, "import"])?;
        debug!(%url, file = file_name, "PUT import");
        let form = Self::file_form(file_name, content)?;
        self.send(self.client.put(url).multipart(form))?;
        Ok(())
    }

    fn delete(&self, id: &str, resource_type: ResourceType) -> Result<()> {
        let url = self.endpoint(resource_type, &[id])?;
        debug!(%url, "DELETE");
        self.send(self.client.delete(url))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn transport() -> HttpTransport {
        HttpTransport::new(&ServerConfig {
            url: "https://localhost:9443/".into(),
            username: Some("admin".into()),
            password: Some("admin".into()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_collection_endpoint() {
        let url = transport()
            .endpoint(ResourceType::Applications, &[])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://localhost:9443/t/carbon.super/api/server/v1/applications"
        );
    }

    #[test]
    fn test_nested_collection_endpoint() {
        let url = transport()
            .endpoint(ResourceType::OidcScopes, &["openid", "export"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://localhost:9443/t/carbon.super/api/server/v1/oidc/scopes/openid/export"
        );
    }

    #[test]
    fn test_identifier_is_percent_encoded() {
        let url = transport()
            .endpoint(ResourceType::Applications, &["My App/1"])
            .unwrap();
        assert!(
            url.as_str().ends_with("/applications/My%20App%2F1"),
            "got: {url}"
        );
    }

    #[test]
    fn test_requires_url() {
        let result = HttpTransport::new(&ServerConfig::default());
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_bearer_token_wins_over_basic() {
        let transport = HttpTransport::new(&ServerConfig {
            url: "https://localhost:9443".into(),
            username: Some("admin".into()),
            token: Some("abc".into()),
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(transport.auth, Auth::Bearer(ref t) if t == "abc"));
    }
}
