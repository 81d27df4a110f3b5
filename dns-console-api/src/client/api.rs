//! Trait implementations for [`HttpApiClient`].

use async_trait::async_trait;
use reqwest::Method;
use urlencoding::encode;

use crate::error::{ApiError, Result};
use crate::traits::{DomainApi, RecordApi, SessionProvider};
use crate::types::{CreateDomainBody, CreateRecordBody, Domain, Record, RecordInput, User};

use super::HttpApiClient;
use super::http::missing_data;

#[async_trait]
impl RecordApi for HttpApiClient {
    async fn list_records(&self, domain_id: &str) -> Result<Vec<Record>> {
        let path = format!("/domains/{}/records", encode(domain_id));
        let records: Option<Vec<Record>> =
            self.get(&path, &format!("domain {domain_id}")).await?;
        Ok(records.unwrap_or_default())
    }

    async fn create_record(&self, domain_id: &str, record: &RecordInput) -> Result<Record> {
        let body = CreateRecordBody { domain_id, record };
        self.send_json(Method::POST, "/records", "records", &body)
            .await?
            .ok_or_else(|| missing_data("created record"))
    }

    async fn update_record(&self, record_id: &str, record: &RecordInput) -> Result<Record> {
        let path = format!("/records/{}", encode(record_id));
        let resource = format!("record {record_id}");
        self.send_json(Method::PUT, &path, &resource, record)
            .await?
            .ok_or_else(|| missing_data(&resource))
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        let path = format!("/records/{}", encode(record_id));
        self.delete(&path, &format!("record {record_id}")).await
    }
}

#[async_trait]
impl DomainApi for HttpApiClient {
    async fn list_domains(&self) -> Result<Vec<Domain>> {
        let domains: Option<Vec<Domain>> = self.get("/domains", "domains").await?;
        Ok(domains.unwrap_or_default())
    }

    async fn get_domain(&self, domain_id: &str) -> Result<Domain> {
        let path = format!("/domains/{}", encode(domain_id));
        let resource = format!("domain {domain_id}");
        self.get(&path, &resource)
            .await?
            .ok_or_else(|| missing_data(&resource))
    }

    async fn create_domain(&self, domain_name: &str) -> Result<Domain> {
        let body = CreateDomainBody { domain_name };
        self.send_json(Method::POST, "/domains", "domains", &body)
            .await?
            .ok_or_else(|| missing_data("created domain"))
    }
}

#[async_trait]
impl SessionProvider for HttpApiClient {
    async fn current_user(&self) -> Result<User> {
        let user: Option<User> = self.get("/me", "user").await?;
        // An empty identity is as good as no session.
        match user {
            Some(user) if user.has_identity() => Ok(user),
            _ => Err(ApiError::Unauthorized {
                raw_message: Some("no authenticated user".to_string()),
            }),
        }
    }
}
