use reqwest::Method;
use serde::Serialize;

use super::ApiClient;
use crate::error::Result;
use crate::models::{AnalyticsReport, Id, User};

#[derive(Debug, Serialize)]
struct ActiveBody {
    is_active: bool,
}

/// `/admin` endpoints
#[derive(Clone, Copy)]
pub struct AdminApi<'a> {
    api: &'a ApiClient,
}

impl<'a> AdminApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    async fn users_at(self, path: &str) -> Result<Vec<User>> {
        let list = self.api.request(Method::GET, path)?.execute_list().await?;
        Ok(list.into_vec())
    }

    pub async fn users(self) -> Result<Vec<User>> {
        self.users_at("/admin/users").await
    }

    pub async fn volunteers(self) -> Result<Vec<User>> {
        self.users_at("/admin/volunteers").await
    }

    pub async fn organization_users(self) -> Result<Vec<User>> {
        self.users_at("/admin/organization-users").await
    }

    pub async fn admins(self) -> Result<Vec<User>> {
        self.users_at("/admin/admins").await
    }

    pub async fn analytics(self) -> Result<AnalyticsReport> {
        self.api
            .request(Method::GET, "/admin/analytics")?
            .execute()
            .await
    }

    pub async fn set_user_active(self, id: Id, is_active: bool) -> Result<()> {
        self.api
            .request(Method::PATCH, &format!("/admin/users/{}", id))?
            .json(&ActiveBody { is_active })?
            .execute_empty()
            .await
    }

    pub async fn delete_user(self, id: Id) -> Result<()> {
        self.api
            .request(Method::DELETE, &format!("/admin/users/{}", id))?
            .execute_empty()
            .await
    }
}
