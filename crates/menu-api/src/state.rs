use std::sync::Arc;

use menu_core::repositories::{PageCache, SiteRepository, UploadStorage};
use menu_core::services::{AdminService, AuthService, CatalogService, StoreLock};
use menu_security::SessionStore;
use menu_shared::config::AppConfig;

use crate::error::ApiError;
use crate::render::Renderer;

pub type SharedAdminService = AdminService<dyn SiteRepository, dyn UploadStorage, dyn PageCache>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<CatalogService<dyn SiteRepository>>,
    pub admin: Arc<SharedAdminService>,
    pub auth: Arc<AuthService<dyn SiteRepository>>,
    pub cache: Arc<dyn PageCache>,
    pub sessions: Arc<SessionStore>,
    pub renderer: Renderer,
}

impl AppState {
    /// Wires the services over the given adapters. The admin and auth
    /// services share one store lock.
    pub fn new(
        config: AppConfig,
        repo: Arc<dyn SiteRepository>,
        uploads: Arc<dyn UploadStorage>,
        cache: Arc<dyn PageCache>,
    ) -> Result<Self, ApiError> {
        let lock = StoreLock::default();
        let admin = AdminService::new(
            repo.clone(),
            uploads,
            cache.clone(),
            lock.clone(),
            config.site.description_max_chars,
        );

        Ok(Self {
            catalog: Arc::new(CatalogService::new(repo.clone())),
            admin: Arc::new(admin),
            auth: Arc::new(AuthService::new(repo, lock)),
            cache,
            sessions: Arc::new(SessionStore::new(config.session.ttl_seconds)),
            renderer: Renderer::new()?,
            config: Arc::new(config),
        })
    }
}
