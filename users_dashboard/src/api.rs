use crate::{CreatedUser, NewUser, RemoteUser, UserRecord};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

/// A remote call that did not succeed. Callers treat every variant alike; the
/// variants only exist so the cause can be logged.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered {status}")]
    Status { url: String, status: StatusCode },
    #[error("unreadable response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
}

/// The remote user collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<RemoteUser>, ApiError>;
    async fn create_user(&self, user: &NewUser) -> Result<CreatedUser, ApiError>;
    async fn update_user(&self, user: &UserRecord) -> Result<(), ApiError>;
    async fn delete_user(&self, id: u64) -> Result<(), ApiError>;
}

pub struct HttpUsersApi {
    client: Client,
    base_url: Url,
}

impl HttpUsersApi {
    /// `timeout` of `None` lets a request wait as long as the server does.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: with_trailing_slash(base_url),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn collection_url(&self) -> Result<Url, ApiError> {
        Ok(self.base_url.join("users")?)
    }

    fn item_url(&self, id: u64) -> Result<Url, ApiError> {
        Ok(self.base_url.join(&format!("users/{}", id))?)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
    ) -> Result<reqwest::Response, ApiError> {
        let response = request
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    async fn list_users(&self) -> Result<Vec<RemoteUser>, ApiError> {
        let url = self.collection_url()?;
        let response = self.send(self.client.get(url.clone()), &url).await?;
        response
            .json::<Vec<RemoteUser>>()
            .await
            .map_err(|source| ApiError::Decode {
                url: url.to_string(),
                source,
            })
    }

    async fn create_user(&self, user: &NewUser) -> Result<CreatedUser, ApiError> {
        let url = self.collection_url()?;
        let response = self
            .send(self.client.post(url.clone()).json(user), &url)
            .await?;
        response
            .json::<CreatedUser>()
            .await
            .map_err(|source| ApiError::Decode {
                url: url.to_string(),
                source,
            })
    }

    async fn update_user(&self, user: &UserRecord) -> Result<(), ApiError> {
        let url = self.item_url(user.id)?;
        self.send(self.client.put(url.clone()).json(user), &url).await?;
        Ok(())
    }

    async fn delete_user(&self, id: u64) -> Result<(), ApiError> {
        let url = self.item_url(id)?;
        self.send(self.client.delete(url.clone()), &url).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpUsersApi {
        HttpUsersApi::new(Url::parse(base).unwrap(), None).unwrap()
    }

    #[test]
    fn builds_collection_and_item_urls_from_host_root() {
        let api = api(DEFAULT_API_URL);
        assert_eq!(
            api.collection_url().unwrap().as_str(),
            "https://jsonplaceholder.typicode.com/users"
        );
        assert_eq!(
            api.item_url(7).unwrap().as_str(),
            "https://jsonplaceholder.typicode.com/users/7"
        );
    }

    #[test]
    fn keeps_base_path_segments() {
        let api = api("http://localhost:3000/api/v1");
        assert_eq!(api.base_url().as_str(), "http://localhost:3000/api/v1/");
        assert_eq!(
            api.item_url(11).unwrap().as_str(),
            "http://localhost:3000/api/v1/users/11"
        );
    }

    #[test]
    fn status_error_names_url_and_code() {
        let err = ApiError::Status {
            url: "http://localhost/users/3".into(),
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(err.to_string(), "http://localhost/users/3 answered 404 Not Found");
    }
}
