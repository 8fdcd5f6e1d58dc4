use super::page::{FetchMode, Outcome, PageData, PageStatus};
use super::records::UserSort;
use super::view::{ListView, PageSlice};
use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::mock::create_users;
use crate::models::{Id, User, UserRole};

/// Which admin user list is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserTab {
    #[default]
    All,
    Volunteers,
    OrganizationUsers,
    Admins,
}

impl UserTab {
    fn includes(self, user: &User) -> bool {
        match self {
            UserTab::All => true,
            UserTab::Volunteers => user.role == UserRole::Volunteer,
            UserTab::OrganizationUsers => user.role == UserRole::Organization,
            UserTab::Admins => user.role == UserRole::Admin,
        }
    }
}

async fn fetch_users(api: &ApiClient, tab: UserTab) -> Result<Vec<User>> {
    let admin = api.admin();
    match tab {
        UserTab::All => admin.users().await,
        UserTab::Volunteers => admin.volunteers().await,
        UserTab::OrganizationUsers => admin.organization_users().await,
        UserTab::Admins => admin.admins().await,
    }
}

fn mock_users(tab: UserTab) -> Vec<User> {
    create_users().into_iter().filter(|u| tab.includes(u)).collect()
}

/// Admin user management
pub struct UsersPage {
    api: ApiClient,
    tab: UserTab,
    data: PageData<Vec<User>>,
    view: ListView<UserSort>,
}

impl UsersPage {
    pub fn new(api: ApiClient) -> Self {
        let data = PageData::new(&api.config().options, FetchMode::Auto);
        Self {
            api,
            tab: UserTab::All,
            data,
            view: ListView::new(),
        }
    }

    pub fn tab(&self) -> UserTab {
        self.tab
    }

    /// Switch tabs and reload
    pub async fn set_tab(&mut self, tab: UserTab) -> &PageStatus {
        self.tab = tab;
        self.view.clear_selection();
        self.view.set_page(1);
        self.load().await
    }

    pub async fn load(&mut self) -> &PageStatus {
        let api = &self.api;
        let tab = self.tab;
        self.data
            .load(move || fetch_users(api, tab), move || mock_users(tab))
            .await
    }

    pub async fn retry(&mut self) -> &PageStatus {
        self.load().await
    }

    pub async fn use_mock_data(&mut self) -> &PageStatus {
        let tab = self.tab;
        self.data.use_mock_data(move || mock_users(tab)).await
    }

    pub fn state(&self) -> &PageData<Vec<User>> {
        &self.data
    }

    pub fn items(&self) -> &[User] {
        self.data.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn view(&self) -> &ListView<UserSort> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ListView<UserSort> {
        &mut self.view
    }

    pub fn visible(&self) -> PageSlice<'_, User> {
        self.view.slice(self.items())
    }

    /// Flip a user between active and inactive
    pub async fn toggle_active(&mut self, id: Id) -> Result<()> {
        let active = self
            .items()
            .iter()
            .find(|u| u.id == id)
            .map(|u| !u.is_active)
            .ok_or_else(|| Error::general(format!("User {} is not listed", id)))?;
        let outcome = if active {
            Outcome::new("User activated", "Could not activate user")
        } else {
            Outcome::new("User deactivated", "Could not deactivate user")
        };

        let api = &self.api;
        self.data
            .mutate(
                id,
                outcome,
                api.admin().set_user_active(id, active),
                move |users, _| {
                    if let Some(user) = users.iter_mut().find(|u| u.id == id) {
                        user.is_active = active;
                    }
                },
            )
            .await
    }

    pub async fn delete(&mut self, id: Id) -> Result<()> {
        let api = &self.api;
        self.data
            .mutate(
                id,
                Outcome::new("User deleted", "Could not delete user"),
                api.admin().delete_user(id),
                move |users, _| users.retain(|u| u.id != id),
            )
            .await?;
        self.view.forget(id);
        Ok(())
    }
}
