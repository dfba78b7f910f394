//! Shared fixtures: an in-memory store and request helpers.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use chrono::Utc;
use courtside_api::{AppState, config::ApiConfig};
use courtside_core::auth::password::hash_password;
use courtside_core::models::auth::{NewUser, User, UserWithPassword};
use courtside_core::models::club::{InventoryInput, InventoryItem, StaffInput, StaffMember};
use courtside_core::store::{ClubStore, StoreError, UserStore};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const PASSWORD: &str = "baseline-serve";

#[derive(Default)]
struct Tables {
    users: Vec<UserWithPassword>,
    staff: Vec<StaffMember>,
    inventory: Vec<InventoryItem>,
}

/// `UserStore + ClubStore` over plain vectors.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Insert a user with a real bcrypt hash of [`PASSWORD`].
    pub fn seed_user(&self, username: &str, is_club_account: bool) -> User {
        let user = User {
            id: Uuid::now_v7(),
            username: username.into(),
            email: format!("{username}@club.test"),
            full_name: None,
            is_club_account,
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().users.push(UserWithPassword {
            user: user.clone(),
            password_hash: Some(hash_password(PASSWORD).unwrap()),
        });
        user
    }

    /// Insert a user that has no password set.
    pub fn seed_passwordless(&self, username: &str) -> User {
        self.seed_with_hash(username, None)
    }

    /// Insert a user with an arbitrary stored hash.
    pub fn seed_with_hash(&self, username: &str, password_hash: Option<&str>) -> User {
        let user = self.seed_user(username, false);
        let mut t = self.tables.lock().unwrap();
        if let Some(rec) = t.users.iter_mut().find(|r| r.user.id == user.id) {
            rec.password_hash = password_hash.map(str::to_string);
        }
        user
    }

    pub fn remove_user(&self, id: Uuid) {
        self.tables.lock().unwrap().users.retain(|r| r.user.id != id);
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_login(&self, login: &str) -> Result<Option<UserWithPassword>, StoreError> {
        let email = login.to_lowercase();
        let t = self.tables.lock().unwrap();
        Ok(t
            .users
            .iter()
            .find(|r| r.user.username == login || r.user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|r| r.user.id == id).map(|r| r.user.clone()))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut t = self.tables.lock().unwrap();
        let email = new_user.email.to_lowercase();
        if t.users.iter().any(|r| r.user.email == email) {
            return Err(StoreError::Conflict("Email already registered".into()));
        }
        if t.users.iter().any(|r| r.user.username == new_user.username) {
            return Err(StoreError::Conflict("Username already taken".into()));
        }
        // Decided under the same lock as the insert.
        let is_club_account = t.users.is_empty();
        let user = User {
            id: Uuid::now_v7(),
            username: new_user.username,
            email,
            full_name: new_user.full_name,
            is_club_account,
            created_at: Utc::now(),
        };
        t.users.push(UserWithPassword {
            user: user.clone(),
            password_hash: Some(new_user.password_hash),
        });
        Ok(user)
    }

    async fn set_club_account(&self, id: Uuid, is_club_account: bool) -> Result<bool, StoreError> {
        let mut t = self.tables.lock().unwrap();
        match t.users.iter_mut().find(|r| r.user.id == id) {
            Some(rec) => {
                rec.user.is_club_account = is_club_account;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ClubStore for MemoryStore {
    async fn list_staff(&self) -> Result<Vec<StaffMember>, StoreError> {
        Ok(self.tables.lock().unwrap().staff.clone())
    }

    async fn create_staff(&self, input: StaffInput) -> Result<StaffMember, StoreError> {
        let now = Utc::now();
        let member = StaffMember {
            id: Uuid::now_v7(),
            name: input.name,
            role: input.role,
            email: input.email,
            phone: input.phone,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().staff.push(member.clone());
        Ok(member)
    }

    async fn update_staff(
        &self,
        id: Uuid,
        input: StaffInput,
    ) -> Result<Option<StaffMember>, StoreError> {
        let mut t = self.tables.lock().unwrap();
        Ok(t.staff.iter_mut().find(|m| m.id == id).map(|m| {
            m.name = input.name;
            m.role = input.role;
            m.email = input.email;
            m.phone = input.phone;
            m.updated_at = Utc::now();
            m.clone()
        }))
    }

    async fn delete_staff(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.staff.len();
        t.staff.retain(|m| m.id != id);
        Ok(t.staff.len() != before)
    }

    async fn list_inventory(&self) -> Result<Vec<InventoryItem>, StoreError> {
        Ok(self.tables.lock().unwrap().inventory.clone())
    }

    async fn create_inventory_item(
        &self,
        input: InventoryInput,
    ) -> Result<InventoryItem, StoreError> {
        let now = Utc::now();
        let item = InventoryItem {
            id: Uuid::now_v7(),
            name: input.name,
            category: input.category,
            quantity: input.quantity,
            condition: input.condition,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().inventory.push(item.clone());
        Ok(item)
    }

    async fn update_inventory_item(
        &self,
        id: Uuid,
        input: InventoryInput,
    ) -> Result<Option<InventoryItem>, StoreError> {
        let mut t = self.tables.lock().unwrap();
        Ok(t.inventory.iter_mut().find(|i| i.id == id).map(|i| {
            i.name = input.name;
            i.category = input.category;
            i.quantity = input.quantity;
            i.condition = input.condition;
            i.updated_at = Utc::now();
            i.clone()
        }))
    }

    async fn delete_inventory_item(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut t = self.tables.lock().unwrap();
        let before = t.inventory.len();
        t.inventory.retain(|i| i.id != id);
        Ok(t.inventory.len() != before)
    }
}

pub fn test_config() -> ApiConfig {
    ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        database_url: "postgres://unused".into(),
        jwt_secret: TEST_SECRET.into(),
    }
}

/// Fresh store plus a router over it.
pub fn test_app() -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState::new(store.clone(), test_config());
    (store, courtside_api::router(state))
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp: Response<Body> = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("parse JSON")
    };
    (status, json)
}

pub fn json_request(method: &str, uri: &str, body: &Value, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, auth_header: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = auth_header {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn delete(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

/// Log in as `username` and return `(access, refresh)`.
pub async fn login(app: &Router, username: &str) -> (String, String) {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/auth/login",
            &serde_json::json!({ "usernameOrEmail": username, "password": PASSWORD }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    (
        body["accessToken"].as_str().unwrap().to_string(),
        body["refreshToken"].as_str().unwrap().to_string(),
    )
}
