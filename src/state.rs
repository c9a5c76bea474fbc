use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, CategoryService, EventService, ImageService, SeaOrmAuthService,
    SeaOrmCategoryService, SeaOrmEventService, SeaOrmImageService, SeaOrmSettingsService,
    SettingsService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub event_service: Arc<dyn EventService>,

    pub category_service: Arc<dyn CategoryService>,

    pub image_service: Arc<dyn ImageService>,

    pub settings_service: Arc<dyn SettingsService>,
}

impl SharedState {
    /// Opens the store described by `config` and wires every service to it.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let auth_service = Arc::new(SeaOrmAuthService::new(&store, config.security.clone()))
            as Arc<dyn AuthService>;

        let event_service =
            Arc::new(SeaOrmEventService::new(&store)) as Arc<dyn EventService>;

        let category_service =
            Arc::new(SeaOrmCategoryService::new(&store)) as Arc<dyn CategoryService>;

        let image_service =
            Arc::new(SeaOrmImageService::new(&store)) as Arc<dyn ImageService>;

        let settings_service = Arc::new(SeaOrmSettingsService::new(
            &store,
            config.settings_defaults.clone(),
        )) as Arc<dyn SettingsService>;

        Self {
            config: Arc::new(config),
            store,
            auth_service,
            event_service,
            category_service,
            image_service,
            settings_service,
        }
    }
}
