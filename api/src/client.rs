use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use types::{
    Employee, EmployeePage, EmployeePayload, EmployeeQuery, Error, ErrorBody, Result,
    auth::{Acknowledgement, Credentials, LoginResponse, PasswordReset},
};

use crate::{Config, Session};

/// Client for the employee backend.
///
/// Every request carries the session's bearer token when there is one. A 401
/// from any endpoint signs the session out before the error is returned, so
/// callers only have to send the user back to the login screen.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    pub fn new(config: Config, session: Session) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// `path` resolved against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Config(format!("{path}: {e}")))
    }

    /// `employees/<id>`, with the id escaped as a single path segment.
    fn employee_url(&self, id: &str) -> Result<Url> {
        let mut url = self.endpoint("employees/")?;
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("{}: not a base URL", self.base_url)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(%method, %url, "api request");
        let request = self.client.request(method, url);

        match self.session.token() {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    fn get(&self, url: Url) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    fn post(&self, url: Url) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    fn put(&self, url: Url) -> RequestBuilder {
        self.request(Method::PUT, url)
    }

    fn delete(&self, url: Url) -> RequestBuilder {
        self.request(Method::DELETE, url)
    }

    async fn try_send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if status == StatusCode::UNAUTHORIZED {
            tracing::info!("server rejected the session, signing out");
            // Already logged by the session; the 401 is what the caller needs.
            let _ = self.session.sign_out();
            return Err(Error::Unauthorized {
                message: ErrorBody::message_from(&body),
            });
        }

        if !status.is_success() {
            let message = ErrorBody::message_from(&body);
            tracing::warn!(%status, ?message, "api request failed");
            return Err(Error::Server {
                status: status.as_u16(),
                message,
            });
        }

        // 204 and friends: let `Option<T>` and unit-like targets decode.
        let body: &[u8] = if body.is_empty() { b"null" } else { &body };
        serde_json::from_slice(body).map_err(|e| {
            tracing::warn!(error = %e, "failed to parse response");
            Error::Decode(e.to_string())
        })
    }

    /// Exchange credentials for a token and store it in the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let response: LoginResponse = self
            .try_send(self.post(self.endpoint("auth/login")?).json(&Credentials {
                username: username.to_string(),
                password: password.to_string(),
            }))
            .await?;

        self.session
            .sign_in(&SecretString::from(response.token))
            .map_err(|e| Error::Storage(e.to_string()))?;
        tracing::info!(username, "signed in");
        Ok(())
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<Acknowledgement> {
        let url = self.endpoint("auth/register")?;
        Ok(self
            .try_send::<Option<Acknowledgement>>(self.post(url).json(&Credentials {
                username: username.to_string(),
                password: password.to_string(),
            }))
            .await?
            .unwrap_or_default())
    }

    pub async fn reset_password(
        &self,
        username: &str,
        new_password: &str,
    ) -> Result<Acknowledgement> {
        let url = self.endpoint("auth/reset-password")?;
        Ok(self
            .try_send::<Option<Acknowledgement>>(self.post(url).json(&PasswordReset {
                username: username.to_string(),
                new_password: new_password.to_string(),
            }))
            .await?
            .unwrap_or_default())
    }

    pub async fn list_employees(&self, query: &EmployeeQuery) -> Result<EmployeePage> {
        self.try_send(self.get(self.endpoint("employees")?).query(&query.to_params()))
            .await
    }

    pub async fn get_employee(&self, id: &str) -> Result<Employee> {
        self.try_send(self.get(self.employee_url(id)?)).await
    }

    pub async fn create_employee(&self, payload: &EmployeePayload) -> Result<Employee> {
        self.try_send(self.post(self.endpoint("employees")?).json(payload))
            .await
    }

    pub async fn update_employee(&self, id: &str, payload: &EmployeePayload) -> Result<Employee> {
        self.try_send(self.put(self.employee_url(id)?).json(payload))
            .await
    }

    pub async fn delete_employee(&self, id: &str) -> Result<()> {
        self.try_send::<Option<Acknowledgement>>(self.delete(self.employee_url(id)?))
            .await?;
        Ok(())
    }

    pub async fn list_departments(&self) -> Result<Vec<String>> {
        self.try_send(self.get(self.endpoint("employees/departments")?))
            .await
    }
}
