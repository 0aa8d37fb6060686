use account_models::{Account, AccountRequest, ErrorShape, HealthStatus, ServiceInfo};
use anyhow::Result;
use reqwest::{Client, Response, StatusCode};

/// Thin typed client over the account REST API.
pub struct AccountClient {
    client: Client,
    base_url: String,
}

impl AccountClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn raw(&self) -> &Client {
        &self.client
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(expect_status(response, StatusCode::OK, "Health").await?.json().await?)
    }

    pub async fn info(&self) -> Result<ServiceInfo> {
        let response = self.client.get(format!("{}/", self.base_url)).send().await?;
        Ok(expect_status(response, StatusCode::OK, "Index").await?.json().await?)
    }

    /// Returns the created account and the `Location` header.
    pub async fn create_account(&self, request: &AccountRequest) -> Result<(Account, String)> {
        let response = self
            .client
            .post(format!("{}/accounts", self.base_url))
            .json(request)
            .send()
            .await?;
        let response = expect_status(response, StatusCode::CREATED, "Create account").await?;
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        Ok((response.json().await?, location))
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let response = self
            .client
            .get(format!("{}/accounts", self.base_url))
            .send()
            .await?;
        Ok(expect_status(response, StatusCode::OK, "List accounts")
            .await?
            .json()
            .await?)
    }

    pub async fn get_account(&self, id: i64) -> Result<Account> {
        let response = self
            .client
            .get(format!("{}/accounts/{}", self.base_url, id))
            .send()
            .await?;
        Ok(expect_status(response, StatusCode::OK, "Get account")
            .await?
            .json()
            .await?)
    }

    pub async fn update_account(&self, id: i64, request: &AccountRequest) -> Result<Account> {
        let response = self
            .client
            .put(format!("{}/accounts/{}", self.base_url, id))
            .json(request)
            .send()
            .await?;
        Ok(expect_status(response, StatusCode::OK, "Update account")
            .await?
            .json()
            .await?)
    }

    pub async fn delete_account(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}/accounts/{}", self.base_url, id))
            .send()
            .await?;
        expect_status(response, StatusCode::NO_CONTENT, "Delete account").await?;
        Ok(())
    }

    /// Fetch a path expecting an error response and decode its body.
    pub async fn get_error(&self, path: &str) -> Result<(StatusCode, ErrorShape)> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        let status = response.status();
        Ok((status, response.json().await?))
    }

    pub async fn metrics(&self) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/metrics", self.base_url))
            .send()
            .await?;
        Ok(expect_status(response, StatusCode::OK, "Metrics")
            .await?
            .text()
            .await?)
    }
}

async fn expect_status(response: Response, expected: StatusCode, action: &str) -> Result<Response> {
    if response.status() != expected {
        let status = response.status();
        let error_text = response.text().await?;
        anyhow::bail!("{} failed with {}: {}", action, status, error_text);
    }
    Ok(response)
}
