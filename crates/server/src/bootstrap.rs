use std::sync::Arc;

use savora_core::catalog::load_store;
use savora_core::config::{AppConfig, ConfigError};
use savora_core::{Cookbook, DatasetError, SubstitutionTable};
use thiserror::Error;
use tracing::info;

use crate::api::AppState;
use crate::sessions::InMemoryProfileRepository;

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("recipe dataset failed to load: {0}")]
    Dataset(#[from] DatasetError),
}

/// Wires an already loaded configuration into application state. The config
/// is validated again so hand-built configs fail before any listener binds.
pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );
    config.validate()?;

    let store = load_store(&config.catalog)?;
    info!(
        event_name = "system.bootstrap.catalog_loaded",
        correlation_id = "bootstrap",
        recipes = store.len(),
        source = if config.catalog.dataset_path.is_some() { "file" } else { "bundled" },
        "recipe catalog loaded"
    );

    let substitutions = SubstitutionTable::bundled();
    info!(
        event_name = "system.bootstrap.substitutions_loaded",
        correlation_id = "bootstrap",
        rules = substitutions.len(),
        "substitution table loaded"
    );

    let cookbook =
        Cookbook::new(store, substitutions, config.search.clone(), config.nutrition.reference);
    let profiles = InMemoryProfileRepository::with_capacity(config.server.max_sessions);
    info!(
        event_name = "system.bootstrap.sessions_ready",
        correlation_id = "bootstrap",
        max_sessions = config.server.max_sessions,
        "session storage ready"
    );
    let state = AppState { cookbook, profiles: Arc::new(profiles) };

    Ok(Application { config, state })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use savora_core::config::AppConfig;
    use savora_core::{InteractionAction, UserProfile};

    use crate::bootstrap::{bootstrap_with_config, BootstrapError};
    use crate::sessions::{RepositoryError, SessionId};

    #[test]
    fn bootstrap_fails_fast_on_invalid_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        let error = bootstrap_with_config(config).err().expect("port zero should be rejected");
        assert!(matches!(error, BootstrapError::Config(_)));
        assert!(error.to_string().contains("server.port"));
    }

    #[test]
    fn bootstrap_reports_missing_dataset() {
        let mut config = AppConfig::default();
        config.catalog.dataset_path = Some(PathBuf::from("/nonexistent/savora/recipes.json"));

        let error = bootstrap_with_config(config).err().expect("dataset should fail to load");

        assert!(matches!(error, BootstrapError::Dataset(_)));
    }

    #[tokio::test]
    async fn bootstrap_wires_catalog_and_session_storage() {
        let app = bootstrap_with_config(AppConfig::default()).expect("defaults should bootstrap");
        assert_eq!(app.state.cookbook.store().len(), 10);
        assert_eq!(app.config.server.port, 8080);

        let session = SessionId::generate();
        let mut profile = UserProfile::new();
        app.state
            .cookbook
            .record_interaction(&mut profile, "Thai Green Curry", InteractionAction::Cook)
            .expect("bundled recipe");
        app.state.profiles.save(session, profile).await.expect("save profile");

        let stored = app.state.profiles.find_by_id(&session).await.expect("find profile");
        assert_eq!(stored.map(|profile| profile.history.len()), Some(1));
    }

    #[tokio::test]
    async fn bootstrap_applies_session_limit() {
        let mut config = AppConfig::default();
        config.server.max_sessions = 1;
        let app = bootstrap_with_config(config).expect("config should bootstrap");

        app.state.profiles.save(SessionId::generate(), UserProfile::new()).await.expect("first");
        let second = app.state.profiles.save(SessionId::generate(), UserProfile::new()).await;

        assert!(matches!(second, Err(RepositoryError::Unavailable(_))));
    }
}
