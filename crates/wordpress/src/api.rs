//! HTTP implementation of [`WordPressClient`] using [`reqwest`].

use async_trait::async_trait;

use crate::client::{BlogConnection, WordPressClient};
use crate::error::{classify_status, WpError};
use crate::types::{PostFields, RemoteMedia, RemotePost, RemoteTerm};

/// REST client for a single WordPress site.
pub struct WordPressApi {
    client: reqwest::Client,
    connection: BlogConnection,
}

impl WordPressApi {
    /// Create a client with its own connection pool.
    pub fn new(connection: BlogConnection) -> Self {
        Self {
            client: reqwest::Client::new(),
            connection,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (shared
    /// connection pooling across blogs).
    pub fn with_client(client: reqwest::Client, connection: BlogConnection) -> Self {
        Self { client, connection }
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.connection.api_base())
    }

    /// Apply Basic auth to a request builder.
    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.basic_auth(&self.connection.username, Some(&self.connection.app_password))
    }

    /// Send a request, mapping transport failures to [`WpError::Connection`]
    /// and non-2xx statuses through the taxonomy.
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, WpError> {
        let response = self
            .authed(builder)
            .send()
            .await
            .map_err(WpError::Connection)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::debug!(status = status.as_u16(), "WordPress API call failed");
            return Err(classify_status(status.as_u16(), body));
        }
        Ok(response)
    }

    /// Send and parse a JSON response body into the expected type.
    async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, WpError> {
        let response = self.send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| WpError::Payload(e.to_string()))
    }
}

#[async_trait]
impl WordPressClient for WordPressApi {
    async fn list_posts(
        &self,
        page: u32,
        per_page: u32,
        status: Option<&str>,
    ) -> Result<Vec<RemotePost>, WpError> {
        let mut request = self
            .client
            .get(self.url("/posts"))
            .query(&[("page", page), ("per_page", per_page)]);
        if let Some(status) = status {
            request = request.query(&[("status", status)]);
        }
        self.send_json(request).await
    }

    async fn get_post(&self, remote_id: i64) -> Result<RemotePost, WpError> {
        let request = self.client.get(self.url(&format!("/posts/{remote_id}")));
        self.send_json(request).await
    }

    async fn create_post(&self, fields: &PostFields) -> Result<RemotePost, WpError> {
        let request = self.client.post(self.url("/posts")).json(fields);
        self.send_json(request).await
    }

    async fn update_post(
        &self,
        remote_id: i64,
        fields: &PostFields,
    ) -> Result<RemotePost, WpError> {
        let request = self
            .client
            .post(self.url(&format!("/posts/{remote_id}")))
            .json(fields);
        self.send_json(request).await
    }

    async fn delete_post(&self, remote_id: i64, force: bool) -> Result<(), WpError> {
        let request = self
            .client
            .delete(self.url(&format!("/posts/{remote_id}")))
            .query(&[("force", force)]);
        self.send(request).await?;
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<RemoteTerm>, WpError> {
        let request = self
            .client
            .get(self.url("/categories"))
            .query(&[("per_page", 100u32)]);
        self.send_json(request).await
    }

    async fn create_category(&self, name: &str) -> Result<RemoteTerm, WpError> {
        let request = self
            .client
            .post(self.url("/categories"))
            .json(&serde_json::json!({ "name": name }));
        self.send_json(request).await
    }

    async fn list_tags(&self) -> Result<Vec<RemoteTerm>, WpError> {
        let request = self
            .client
            .get(self.url("/tags"))
            .query(&[("per_page", 100u32)]);
        self.send_json(request).await
    }

    async fn create_tag(&self, name: &str) -> Result<RemoteTerm, WpError> {
        let request = self
            .client
            .post(self.url("/tags"))
            .json(&serde_json::json!({ "name": name }));
        self.send_json(request).await
    }

    async fn upload_media(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<RemoteMedia, WpError> {
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| WpError::Payload(format!("invalid media content type: {e}")))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let request = self.client.post(self.url("/media")).multipart(form);
        self.send_json(request).await
    }

    async fn test_connection(&self) -> Result<(), WpError> {
        let request = self
            .client
            .get(self.url("/posts"))
            .query(&[("per_page", 1u32)]);
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_base_strips_trailing_slash() {
        let api = WordPressApi::new(BlogConnection::new(
            "https://blog.example/",
            "editor",
            "app-password",
        ));
        assert_eq!(api.url("/posts"), "https://blog.example/wp-json/wp/v2/posts");
    }
}
