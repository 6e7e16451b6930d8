//! Sample annotated API. `dispatch.rs` beside this file is what
//! `apigen generate` emits for it.
#![allow(dead_code)]

use apigen::{ApiError, ApiParams, RequestContext};
use http::StatusCode;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[path = "dispatch.rs"]
mod dispatch;

#[derive(Debug, Default, Clone, PartialEq, ApiParams)]
pub struct ProfileParams {
    #[apivalidator("required")]
    pub login: String,
}

#[derive(Debug, Default, Clone, PartialEq, ApiParams)]
pub struct CreateParams {
    #[apivalidator("required,min=10")]
    pub login: String,
    #[apivalidator("paramname=full_name")]
    pub name: String,
    #[apivalidator("enum=user|moderator|admin,default=user")]
    pub status: String,
    #[apivalidator("min=0,max=128")]
    pub age: u8,
}

#[derive(Debug, Default, Clone, PartialEq, ApiParams)]
pub struct OtherCreateParams {
    #[apivalidator("required,min=3")]
    pub username: String,
    #[apivalidator("paramname=account_name")]
    pub name: String,
    #[apivalidator("enum=warrior|sorcerer|rouge,default=warrior")]
    pub r#type: String,
    #[apivalidator("min=1,max=50")]
    pub level: i32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct HealthParams {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: u64,
    pub login: String,
    pub full_name: String,
    pub status: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewUser {
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OtherUser {
    pub id: u64,
    pub login: String,
    pub full_name: String,
    pub level: i32,
}

#[derive(Debug, Default)]
pub struct MyApi {
    calls: AtomicUsize,
}

impl MyApi {
    /// Number of business calls that reached a handler body.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Looks up a user by login.
    /// apigen:api {"url": "/user/profile", "auth": false}
    pub fn profile(&self, _ctx: &RequestContext, params: ProfileParams) -> Result<User, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match params.login.as_str() {
            "bad_user" => Err(ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "bad user")),
            "not_exist" => Err(ApiError::new(StatusCode::NOT_FOUND, "user not exist")),
            login => Ok(User {
                id: 42,
                login: login.to_string(),
                full_name: "Vasily Romanov".to_string(),
                status: 20,
            }),
        }
    }

    /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
    pub fn create(&self, _ctx: &RequestContext, params: &CreateParams) -> Result<NewUser, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if params.login == "not_unique_login" {
            return Err(ApiError::new(StatusCode::CONFLICT, "user not_unique_login exist"));
        }
        Ok(NewUser { id: 43 })
    }
}

#[derive(Debug, Default)]
pub struct OtherApi;

impl OtherApi {
    /// apigen:api {"url": "/user/create", "auth": true, "method": "POST"}
    pub fn create(
        &self,
        _ctx: &RequestContext,
        params: &OtherCreateParams,
    ) -> anyhow::Result<OtherUser> {
        if params.username == "bad_username" {
            anyhow::bail!("bad user");
        }
        Ok(OtherUser {
            id: 12,
            login: params.username.clone(),
            full_name: params.name.clone(),
            level: params.level,
        })
    }

    /// apigen:api {"url": "/health"}
    pub fn health(&self, _ctx: &RequestContext, _params: HealthParams) -> Result<String, ApiError> {
        Ok("ok".to_string())
    }
}
