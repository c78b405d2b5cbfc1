//! Fixtures and in-memory stores for unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use axum::{Extension, Router};
use chrono::Utc;
use fake::{faker::internet::en::SafeEmail, Fake};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::access::{AccessContext, Role, RoleLookup};
use crate::features::auth::clients::{AuthProvider, BackendSession, BackendUser, SignUpOutcome};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::JwtValidator;
use crate::features::branches::models::Branch;
use crate::features::branches::repositories::BranchRepository;
use crate::features::folders::models::Folder;
use crate::features::folders::repositories::{FolderRepository, NewFolder};
use crate::features::notifications::models::{Notification, NotificationType};
use crate::features::notifications::repositories::NotificationRepository;
use crate::features::profiles::models::Profile;
use crate::features::profiles::repositories::{NewProfile, ProfileChanges, ProfileRepository};
use crate::features::resources::models::{Resource, ResourceFilter};
use crate::features::resources::repositories::{NewResource, ResourceRepository};
use crate::modules::storage::ObjectStore;
use crate::shared::constants::{DEFAULT_FOLDER_COLOR, ROLE_STUDENT};

pub const TEST_JWT_SECRET: &str = "test-only-hs256-secret-0123456789abcdef";
pub const TEST_BUCKET: &str = "eng-docs";

const TEST_STORAGE_URL: &str = "https://backend.example.co/storage/v1/object/public";

// =============================================================================
// SESSIONS
// =============================================================================

/// HS256 access token shaped like the auth backend's
pub fn sign_token(user_id: Uuid, audience: &str, ttl_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = json!({
        "sub": user_id,
        "aud": audience,
        "exp": now + ttl_secs,
        "iat": now,
        "email": SafeEmail().fake::<String>(),
        "role": "authenticated",
        "session_id": Uuid::new_v4().to_string(),
    });

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn test_validator() -> JwtValidator {
    JwtValidator::new(
        TEST_JWT_SECRET,
        "authenticated".to_string(),
        Duration::from_secs(0),
    )
}

pub fn user_with_id(id: Uuid) -> AuthenticatedUser {
    AuthenticatedUser {
        id,
        email: Some(SafeEmail().fake()),
        session_id: None,
        access_token: "test-access-token".to_string(),
    }
}

pub fn student_user() -> AuthenticatedUser {
    user_with_id(Uuid::new_v4())
}

/// Stand-in for the route guard: every request carries `context`
pub fn with_access_context(router: Router, context: AccessContext) -> Router {
    router.layer(Extension(context))
}

pub fn admin_context() -> AccessContext {
    AccessContext {
        user: Some(student_user()),
        role: Some(Role::Admin),
    }
}

/// Fixed role for every user; counts lookups
pub struct StaticRoles {
    role: Option<Role>,
    lookups: AtomicUsize,
}

impl StaticRoles {
    pub fn new(role: Option<Role>) -> Self {
        Self {
            role,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoleLookup for StaticRoles {
    async fn role_of(&self, _user_id: Uuid) -> Result<Option<Role>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.role)
    }
}

// =============================================================================
// FIXTURES
// =============================================================================

pub fn sample_resource(title: &str, branch: &str, semester: i32) -> Resource {
    let id = Uuid::new_v4();
    Resource {
        id,
        title: title.to_string(),
        branch: branch.to_string(),
        semester,
        subject_code: format!("KCS-{}0{}", semester, (1..10).fake::<u8>()),
        resource_type: "Notes".to_string(),
        file_url: format!("{}/{}/{}.pdf", TEST_STORAGE_URL, TEST_BUCKET, id.simple()),
        uploaded_by: None,
        folder_id: None,
        created_at: Utc::now(),
    }
}

pub fn sample_folder(name: &str, parent_id: Option<Uuid>) -> Folder {
    Folder {
        id: Uuid::new_v4(),
        name: name.to_string(),
        parent_id,
        color: DEFAULT_FOLDER_COLOR.to_string(),
        created_by: None,
        created_at: Utc::now(),
    }
}

// =============================================================================
// OBJECT STORE
// =============================================================================

/// Records stored and removed keys
#[derive(Default)]
pub struct FakeObjectStore {
    uploads: Mutex<Vec<String>>,
    removals: Mutex<Vec<String>>,
    fail_removals: AtomicBool,
}

impl FakeObjectStore {
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn removals(&self) -> Vec<String> {
        self.removals.lock().unwrap().clone()
    }

    pub fn fail_removals(&self) {
        self.fail_removals.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn upload(
        &self,
        key: &str,
        _data: Vec<u8>,
        _content_type: &str,
    ) -> std::result::Result<(), AppError> {
        self.uploads.lock().unwrap().push(key.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> std::result::Result<(), AppError> {
        if self.fail_removals.load(Ordering::SeqCst) {
            return Err(AppError::ExternalServiceError("storage offline".to_string()));
        }
        self.removals.lock().unwrap().push(key.to_string());
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", TEST_STORAGE_URL, TEST_BUCKET, key)
    }

    fn bucket_name(&self) -> String {
        TEST_BUCKET.to_string()
    }
}

// =============================================================================
// REPOSITORIES
// =============================================================================

#[derive(Default)]
pub struct InMemoryResources {
    rows: Mutex<Vec<Resource>>,
    fail_inserts: AtomicBool,
}

impl InMemoryResources {
    pub fn seed(&self, resource: Resource) {
        self.rows.lock().unwrap().push(resource);
    }

    pub fn fail_inserts(&self) {
        self.fail_inserts.store(true, Ordering::SeqCst);
    }

    fn newest_first(&self, keep: impl Fn(&Resource) -> bool) -> Vec<Resource> {
        let mut rows: Vec<Resource> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| keep(r))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }

    fn modify(&self, id: Uuid, change: impl FnOnce(&mut Resource)) -> Option<Resource> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows.iter_mut().find(|r| r.id == id)?;
        change(row);
        Some(row.clone())
    }
}

#[async_trait]
impl ResourceRepository for InMemoryResources {
    async fn list(&self, filter: &ResourceFilter) -> Result<Vec<Resource>> {
        Ok(self.newest_first(|r| filter.matches(r)))
    }

    async fn page(
        &self,
        filter: &ResourceFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Resource>> {
        Ok(self
            .newest_first(|r| filter.matches(r))
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, filter: &ResourceFilter) -> Result<i64> {
        Ok(self.newest_first(|r| filter.matches(r)).len() as i64)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Resource>> {
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, resource: NewResource) -> Result<Resource> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }

        let row = Resource {
            id: Uuid::new_v4(),
            title: resource.title,
            branch: resource.branch,
            semester: resource.semester,
            subject_code: resource.subject_code,
            resource_type: resource.resource_type.as_str().to_string(),
            file_url: resource.file_url,
            uploaded_by: Some(resource.uploaded_by),
            folder_id: resource.folder_id,
            created_at: Utc::now(),
        };
        self.seed(row.clone());
        Ok(row)
    }

    async fn update_details(
        &self,
        id: Uuid,
        title: &str,
        subject_code: &str,
    ) -> Result<Option<Resource>> {
        Ok(self.modify(id, |r| {
            r.title = title.to_string();
            r.subject_code = subject_code.to_string();
        }))
    }

    async fn set_folder(&self, id: Uuid, folder_id: Option<Uuid>) -> Result<Option<Resource>> {
        Ok(self.modify(id, |r| r.folder_id = folder_id))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Resource>> {
        Ok(self
            .newest_first(|_| true)
            .into_iter()
            .take(limit as usize)
            .collect())
    }

    async fn uploaded_by(&self, user_id: Uuid) -> Result<Vec<Resource>> {
        Ok(self.newest_first(|r| r.uploaded_by == Some(user_id)))
    }
}

/// Counts every write call
#[derive(Default)]
pub struct InMemoryFolders {
    rows: Mutex<Vec<Folder>>,
    writes: AtomicUsize,
}

impl InMemoryFolders {
    pub fn seed(&self, folder: Folder) {
        self.rows.lock().unwrap().push(folder);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn modify(&self, id: Uuid, change: impl FnOnce(&mut Folder)) -> Option<Folder> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let row = rows.iter_mut().find(|f| f.id == id)?;
        change(row);
        Some(row.clone())
    }
}

#[async_trait]
impl FolderRepository for InMemoryFolders {
    async fn list_all(&self) -> Result<Vec<Folder>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Folder>> {
        Ok(self.rows.lock().unwrap().iter().find(|f| f.id == id).cloned())
    }

    async fn insert(&self, folder: NewFolder) -> Result<Folder> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let row = Folder {
            id: Uuid::new_v4(),
            name: folder.name,
            parent_id: folder.parent_id,
            color: folder.color,
            created_by: Some(folder.created_by),
            created_at: Utc::now(),
        };
        self.seed(row.clone());
        Ok(row)
    }

    async fn rename(&self, id: Uuid, name: &str) -> Result<Option<Folder>> {
        Ok(self.modify(id, |f| f.name = name.to_string()))
    }

    async fn set_parent(&self, id: Uuid, parent_id: Option<Uuid>) -> Result<Option<Folder>> {
        Ok(self.modify(id, |f| f.parent_id = parent_id))
    }

    /// Cascades to subfolders like the foreign key does
    async fn delete(&self, id: Uuid) -> Result<bool> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        if !rows.iter().any(|f| f.id == id) {
            return Ok(false);
        }

        let mut doomed = vec![id];
        let mut i = 0;
        while i < doomed.len() {
            let parent = doomed[i];
            let children: Vec<Uuid> = rows
                .iter()
                .filter(|f| f.parent_id == Some(parent) && !doomed.contains(&f.id))
                .map(|f| f.id)
                .collect();
            doomed.extend(children);
            i += 1;
        }
        rows.retain(|f| !doomed.contains(&f.id));
        Ok(true)
    }
}

/// Enforces unique names
#[derive(Default)]
pub struct InMemoryBranches {
    rows: Mutex<Vec<Branch>>,
}

#[async_trait]
impl BranchRepository for InMemoryBranches {
    async fn list(&self) -> Result<Vec<Branch>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn insert(&self, name: &str) -> Result<Branch> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|b| b.name == name) {
            return Err(AppError::Conflict(format!("Branch {} already exists", name)));
        }
        let branch = Branch {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        rows.push(branch.clone());
        Ok(branch)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|b| b.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryNotifications {
    rows: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationRepository for InMemoryNotifications {
    async fn list(&self) -> Result<Vec<Notification>> {
        Ok(self.rows.lock().unwrap().iter().rev().cloned().collect())
    }

    async fn insert(
        &self,
        message: &str,
        notification_type: NotificationType,
        created_by: Uuid,
    ) -> Result<Notification> {
        let notification = Notification {
            id: Uuid::new_v4(),
            message: message.to_string(),
            notification_type: notification_type.as_str().to_string(),
            created_by: Some(created_by),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(notification.clone());
        Ok(notification)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|n| n.id != id);
        Ok(rows.len() < before)
    }
}

/// Profiles keyed by user id; doubles as the role lookup
#[derive(Default)]
pub struct InMemoryProfiles {
    rows: Mutex<HashMap<Uuid, Profile>>,
    updates: AtomicUsize,
}

impl InMemoryProfiles {
    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn set_role(&self, id: Uuid, role: Role) {
        if let Some(profile) = self.rows.lock().unwrap().get_mut(&id) {
            profile.role = role.as_str().to_string();
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfiles {
    async fn find(&self, id: Uuid) -> Result<Option<Profile>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn create_student(&self, profile: NewProfile) -> Result<()> {
        self.rows
            .lock()
            .unwrap()
            .entry(profile.id)
            .or_insert_with(|| Profile {
                id: profile.id,
                email: profile.email,
                full_name: profile.full_name,
                branch: profile.branch,
                semester: profile.semester,
                role: ROLE_STUDENT.to_string(),
                created_at: Utc::now(),
            });
        Ok(())
    }

    async fn update_details(&self, id: Uuid, changes: ProfileChanges) -> Result<Option<Profile>> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let Some(profile) = rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(full_name) = changes.full_name {
            profile.full_name = Some(full_name);
        }
        if let Some(branch) = changes.branch {
            profile.branch = Some(branch);
        }
        if let Some(semester) = changes.semester {
            profile.semester = Some(semester);
        }
        Ok(Some(profile.clone()))
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }
}

#[async_trait]
impl RoleLookup for InMemoryProfiles {
    async fn role_of(&self, user_id: Uuid) -> Result<Option<Role>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(&user_id)
            .and_then(|p| p.role()))
    }
}

// =============================================================================
// AUTH BACKEND
// =============================================================================

/// Accepts every credential unless a failure is queued
#[derive(Default)]
pub struct FakeAuthProvider {
    failure: Mutex<Option<AppError>>,
    calls: AtomicUsize,
    last_redirect: Mutex<Option<String>>,
}

impl FakeAuthProvider {
    /// The next call returns `error`
    pub fn fail_next(&self, error: AppError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_redirect(&self) -> Option<String> {
        self.last_redirect.lock().unwrap().clone()
    }

    fn call(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn session(email: &str) -> BackendSession {
        let user = BackendUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
            email_confirmed_at: Some(Utc::now()),
        };
        BackendSession {
            access_token: sign_token(user.id, "authenticated", 3600),
            token_type: "bearer".to_string(),
            expires_in: 3600,
            refresh_token: Uuid::new_v4().simple().to_string(),
            user,
        }
    }
}

#[async_trait]
impl AuthProvider for FakeAuthProvider {
    async fn sign_up(
        &self,
        email: &str,
        _password: &str,
        _full_name: &str,
    ) -> Result<SignUpOutcome> {
        self.call()?;
        let session = Self::session(email);
        Ok(SignUpOutcome {
            user: session.user.clone(),
            session: Some(session),
        })
    }

    async fn sign_in_with_password(&self, email: &str, _password: &str) -> Result<BackendSession> {
        self.call()?;
        Ok(Self::session(email))
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<BackendSession> {
        self.call()?;
        Ok(Self::session(&SafeEmail().fake::<String>()))
    }

    async fn sign_out(&self, _access_token: &str) -> Result<()> {
        self.call()
    }

    async fn reset_password_for_email(&self, _email: &str, redirect_to: &str) -> Result<()> {
        self.call()?;
        *self.last_redirect.lock().unwrap() = Some(redirect_to.to_string());
        Ok(())
    }
}
