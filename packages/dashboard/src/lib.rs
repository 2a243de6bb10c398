#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard controller for the emergency map.
//!
//! A [`Dashboard`] owns one session's [`ResourceStore`], its
//! [`DataSource`], the local [`IncidentSnapshot`], the intake form, and
//! the selected category filter. Every I/O operation (load, refresh,
//! submit) goes through a loading gate: starting one while another is in
//! flight fails with [`DashboardError::Busy`]. Store locks are only taken
//! between awaits, never across one.

pub mod config;
pub mod intake;
pub mod view;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use emergency_map_annotation::{AnnotationBuilder, FormatOptions, MapLayer};
use emergency_map_client::{ApiClient, ClientError, DataSource, StaticSource};
use emergency_map_models::{Incident, Locale, Resource, Statistics};
use emergency_map_store::snapshot::{IncidentSnapshot, JsonFileSnapshot};
use emergency_map_store::{CategoryFilter, Collections, ResourceStore};
use tokio::sync::watch;

pub use config::{ConfigError, DashboardConfig};
pub use intake::{IncidentDraft, IntakeError, IntakeForm};
pub use view::{DashboardView, IntakePanel};

/// Errors from dashboard operations.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Another load, refresh, or submission is still running.
    #[error("Another operation is in progress")]
    Busy,

    /// The data source failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The intake draft is invalid.
    #[error(transparent)]
    Intake(#[from] IntakeError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Outcome of a successful load or refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Store revision after the replace.
    pub revision: u64,
    /// Statistics after the replace.
    pub statistics: Statistics,
    /// `true` when incidents could not be fetched and the previous ones
    /// (from the store or snapshot) were kept.
    pub incidents_from_snapshot: bool,
}

/// Holds the loading gate until dropped.
struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// One dashboard session.
pub struct Dashboard {
    source: Arc<dyn DataSource>,
    snapshot: Arc<dyn IncidentSnapshot>,
    store: RwLock<ResourceStore>,
    intake: Mutex<IntakeForm>,
    selected: RwLock<CategoryFilter>,
    options: FormatOptions,
    loading: AtomicBool,
    last_synced: Mutex<Option<DateTime<Utc>>>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("source", &self.source.name())
            .field("options", &self.options)
            .field("loading", &self.is_loading())
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    /// Creates a dashboard with an empty store.
    #[must_use]
    pub fn new(
        source: Arc<dyn DataSource>,
        snapshot: Arc<dyn IncidentSnapshot>,
        options: FormatOptions,
    ) -> Self {
        Self {
            source,
            snapshot,
            store: RwLock::new(ResourceStore::new()),
            intake: Mutex::new(IntakeForm::default()),
            selected: RwLock::new(CategoryFilter::All),
            options,
            loading: AtomicBool::new(false),
            last_synced: Mutex::new(None),
        }
    }

    /// Builds a dashboard from configuration: the seed data source when
    /// `offline` is set, the REST client otherwise, and a JSON file
    /// snapshot at the configured path.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Client`] if the API URL is invalid or
    /// the seed data does not parse.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, DashboardError> {
        let source: Arc<dyn DataSource> = if config.offline {
            log::info!("Offline mode: using bundled seed data");
            Arc::new(StaticSource::seeded()?)
        } else {
            log::info!("Using backend at {}", config.api_url);
            Arc::new(ApiClient::new(&config.api_url)?)
        };
        let snapshot = Arc::new(JsonFileSnapshot::new(&config.snapshot_path));
        Ok(Self::new(source, snapshot, config.format_options()))
    }

    /// Default formatting options for views.
    #[must_use]
    pub const fn format_options(&self) -> FormatOptions {
        self.options
    }

    /// Name of the data source, for logs and health output.
    #[must_use]
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Whether a load, refresh, or submission is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// When the store was last synced with the data source.
    #[must_use]
    pub fn last_synced(&self) -> Option<DateTime<Utc>> {
        *self.last_synced.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) -> Result<LoadingGuard<'_>, DashboardError> {
        self.loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| DashboardError::Busy)?;
        Ok(LoadingGuard {
            flag: &self.loading,
        })
    }

    /// Initial load: restores incidents from the local snapshot, then
    /// syncs everything from the data source.
    ///
    /// When the data source is unreachable the snapshot incidents stay in
    /// the store and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Busy`] if another operation is running,
    /// or [`DashboardError::Client`] if resources or outages cannot be
    /// fetched.
    pub async fn load(&self) -> Result<SyncReport, DashboardError> {
        let _guard = self.begin()?;

        let incidents = self.snapshot.load();
        if !incidents.is_empty() {
            log::info!("Restored {} incidents from snapshot", incidents.len());
            let mut store = self.write_store();
            let collections = Collections {
                resources: store.resources().to_vec(),
                incidents,
                outages: store.outages().to_vec(),
            };
            store.replace(collections);
        }

        self.sync().await
    }

    /// Re-fetches every collection and replaces the store in one write.
    /// On failure the previous collections are kept.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Busy`] if another operation is running,
    /// or [`DashboardError::Client`] if resources or outages cannot be
    /// fetched.
    pub async fn refresh(&self) -> Result<SyncReport, DashboardError> {
        let _guard = self.begin()?;
        self.sync().await
    }

    async fn sync(&self) -> Result<SyncReport, DashboardError> {
        log::info!("Syncing from {}", self.source.name());
        let (resources, incidents, outages, remote_stats) = futures::join!(
            self.source.fetch_resources(None),
            self.source.fetch_incidents(),
            self.source.fetch_outages(),
            self.source.fetch_statistics(),
        );

        let resources = resources.inspect_err(|e| log::error!("Failed to fetch resources: {e}"))?;
        let outages = outages.inspect_err(|e| log::error!("Failed to fetch outages: {e}"))?;
        let (incidents, incidents_from_snapshot) = match incidents {
            Ok(incidents) => (incidents, false),
            Err(e) => {
                log::warn!("Failed to fetch incidents, keeping local copy: {e}");
                (self.read_store().incidents().to_vec(), true)
            }
        };

        let (revision, statistics, saved) = {
            let mut store = self.write_store();
            let revision = store.replace(Collections {
                resources,
                incidents,
                outages,
            });
            (revision, store.statistics(), store.incidents().to_vec())
        };
        if !incidents_from_snapshot {
            self.snapshot.save(&saved);
        }

        match remote_stats {
            Ok(remote) if remote != statistics => {
                log::warn!("Backend statistics {remote:?} differ from derived {statistics:?}");
            }
            Ok(_) => {}
            Err(e) => log::debug!("Backend statistics unavailable: {e}"),
        }

        *self
            .last_synced
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Utc::now());
        log::info!(
            "Synced revision {revision}: {} resources, {} open incidents, {} active outages",
            statistics.total_resources,
            statistics.open_incidents,
            statistics.active_outages
        );

        Ok(SyncReport {
            revision,
            statistics,
            incidents_from_snapshot,
        })
    }

    /// Submits the intake form's draft.
    ///
    /// On success the stored record is appended to the store, the
    /// snapshot is rewritten, and the form is reset and closed. On
    /// failure the form stays open with the draft and the error message.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Busy`] if another operation is running,
    /// [`DashboardError::Intake`] if the draft is invalid, or
    /// [`DashboardError::Client`] if the data source rejects it.
    pub async fn submit_incident(&self) -> Result<Incident, DashboardError> {
        let _guard = self.begin()?;

        let draft = self.lock_intake().draft.clone();
        let result = match draft.prepare(Utc::now()) {
            Ok(incident) => self
                .source
                .submit_incident(&incident)
                .await
                .map_err(DashboardError::from),
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(stored) => {
                let saved = {
                    let mut store = self.write_store();
                    store.append_incident(stored.clone());
                    store.incidents().to_vec()
                };
                self.snapshot.save(&saved);
                self.lock_intake().complete();
                log::info!("Reported incident {} ({})", stored.id, stored.kind);
                Ok(stored)
            }
            Err(e) => {
                log::error!("Failed to submit incident: {e}");
                self.lock_intake().fail(e.to_string());
                Err(e)
            }
        }
    }

    /// Replaces the draft and submits it.
    ///
    /// # Errors
    ///
    /// See [`Dashboard::submit_incident`].
    pub async fn submit_draft(&self, draft: IncidentDraft) -> Result<Incident, DashboardError> {
        {
            let mut form = self.lock_intake();
            form.open();
            form.set_draft(draft);
        }
        self.submit_incident().await
    }

    /// Opens the intake form.
    pub fn open_intake(&self) -> IntakeForm {
        let mut form = self.lock_intake();
        form.open();
        form.clone()
    }

    /// Closes the intake form, keeping the draft.
    pub fn cancel_intake(&self) -> IntakeForm {
        let mut form = self.lock_intake();
        form.cancel();
        form.clone()
    }

    /// Current intake form state.
    #[must_use]
    pub fn intake(&self) -> IntakeForm {
        self.lock_intake().clone()
    }

    /// Selects the category filter used when a view does not name one.
    pub fn select_category(&self, filter: CategoryFilter) {
        *self
            .selected
            .write()
            .unwrap_or_else(PoisonError::into_inner) = filter;
    }

    /// Currently selected category filter.
    #[must_use]
    pub fn selected_category(&self) -> CategoryFilter {
        *self.selected.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current statistics.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        self.read_store().statistics()
    }

    /// Current store revision.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.read_store().revision()
    }

    /// Subscribes to store revision changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.read_store().subscribe()
    }

    /// Resources passing `filter`, in upstream order.
    #[must_use]
    pub fn resources(&self, filter: CategoryFilter) -> Vec<Resource> {
        self.read_store()
            .visible_resources(filter)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Finds a resource by ID.
    #[must_use]
    pub fn resource(&self, id: &str) -> Option<Resource> {
        self.read_store().resource(id).cloned()
    }

    /// All incidents.
    #[must_use]
    pub fn incidents(&self) -> Vec<Incident> {
        self.read_store().incidents().to_vec()
    }

    /// Map annotations for `filter` in `locale`.
    #[must_use]
    pub fn layer(&self, filter: CategoryFilter, locale: Locale) -> MapLayer {
        let builder = self.builder(locale);
        let store = self.read_store();
        builder.layer(store.visible_resources(filter), store.incidents(), store.outages())
    }

    /// Composes the full dashboard view. `filter` and `locale` default to
    /// the selected filter and the configured locale.
    #[must_use]
    pub fn view(&self, filter: Option<CategoryFilter>, locale: Option<Locale>) -> DashboardView {
        let filter = filter.unwrap_or_else(|| self.selected_category());
        let locale = locale.unwrap_or(self.options.locale);
        let builder = self.builder(locale);
        let intake = self.intake();
        let loading = self.is_loading();

        let store = self.read_store();
        view::compose(view::ViewParts {
            locale,
            revision: store.revision(),
            loading,
            statistics: store.statistics(),
            selected: filter,
            layer: builder.layer(
                store.visible_resources(filter),
                store.incidents(),
                store.outages(),
            ),
            total_resources: store.resources().len(),
            intake,
        })
    }

    fn builder(&self, locale: Locale) -> AnnotationBuilder {
        AnnotationBuilder::new(FormatOptions {
            locale,
            ..self.options
        })
    }

    fn read_store(&self) -> std::sync::RwLockReadGuard<'_, ResourceStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_store(&self) -> std::sync::RwLockWriteGuard<'_, ResourceStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_intake(&self) -> std::sync::MutexGuard<'_, IntakeForm> {
        self.intake.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use emergency_map_client::HealthStatus;
    use emergency_map_models::{IncidentStatus, IncidentType, Priority, ResourceCategory};
    use emergency_map_models::{Coordinate, OutageZone};
    use emergency_map_store::snapshot::InMemorySnapshot;
    use tokio::sync::Notify;

    use super::*;

    /// Seed data with switchable failures and an optional pause inside
    /// `fetch_resources`.
    #[derive(Default)]
    struct TestSource {
        inner: StaticSource,
        fail_fetch: AtomicBool,
        fail_incidents: AtomicBool,
        fail_submit: AtomicBool,
        submits: AtomicUsize,
        pause: Option<(Arc<Notify>, Arc<Notify>)>,
    }

    impl TestSource {
        fn seeded() -> Self {
            Self {
                inner: StaticSource::seeded().unwrap(),
                ..Self::default()
            }
        }

        fn unavailable() -> ClientError {
            ClientError::Status {
                status: 503,
                url: "http://backend/api".to_string(),
            }
        }
    }

    #[async_trait]
    impl DataSource for TestSource {
        fn name(&self) -> &str {
            "test"
        }

        async fn fetch_resources(
            &self,
            category: Option<ResourceCategory>,
        ) -> Result<Vec<Resource>, ClientError> {
            if let Some((entered, release)) = &self.pause {
                entered.notify_one();
                release.notified().await;
            }
            if self.fail_fetch.load(Ordering::SeqCst) {
                return Err(Self::unavailable());
            }
            self.inner.fetch_resources(category).await
        }

        async fn fetch_resource(&self, id: &str) -> Result<Option<Resource>, ClientError> {
            self.inner.fetch_resource(id).await
        }

        async fn fetch_incidents(&self) -> Result<Vec<Incident>, ClientError> {
            if self.fail_incidents.load(Ordering::SeqCst) {
                return Err(Self::unavailable());
            }
            self.inner.fetch_incidents().await
        }

        async fn fetch_outages(&self) -> Result<Vec<OutageZone>, ClientError> {
            self.inner.fetch_outages().await
        }

        async fn fetch_statistics(&self) -> Result<Statistics, ClientError> {
            self.inner.fetch_statistics().await
        }

        async fn submit_incident(&self, incident: &Incident) -> Result<Incident, ClientError> {
            self.submits.fetch_add(1, Ordering::SeqCst);
            if self.fail_submit.load(Ordering::SeqCst) {
                return Err(Self::unavailable());
            }
            self.inner.submit_incident(incident).await
        }

        async fn health(&self) -> Result<HealthStatus, ClientError> {
            self.inner.health().await
        }
    }

    fn build(source: TestSource) -> (Dashboard, Arc<TestSource>, Arc<InMemorySnapshot>) {
        let source = Arc::new(source);
        let snapshot = Arc::new(InMemorySnapshot::default());
        let dashboard = Dashboard::new(source.clone(), snapshot.clone(), FormatOptions::default());
        (dashboard, source, snapshot)
    }

    fn fire_draft() -> IncidentDraft {
        IncidentDraft {
            title_he: "שריפה".to_string(),
            description_he: "שריפה בבניין".to_string(),
            kind: IncidentType::Fire,
            location: Coordinate::new(32.08, 34.78),
            ..IncidentDraft::default()
        }
    }

    #[tokio::test]
    async fn load_populates_store_and_statistics() {
        let (dashboard, _, _) = build(TestSource::seeded());
        let report = dashboard.load().await.unwrap();
        assert_eq!(report.revision, 1);
        assert_eq!(
            report.statistics,
            Statistics {
                total_resources: 25,
                active_resources: 24,
                open_incidents: 0,
                active_outages: 2,
            }
        );
        assert!(!dashboard.is_loading());
        assert!(dashboard.last_synced().is_some());
    }

    #[tokio::test]
    async fn load_restores_snapshot_when_backend_is_down() {
        let source = TestSource::seeded();
        source.fail_fetch.store(true, Ordering::SeqCst);
        source.fail_incidents.store(true, Ordering::SeqCst);
        let source = Arc::new(source);
        let persisted = fire_draft().prepare(Utc::now()).unwrap();
        let snapshot = Arc::new(InMemorySnapshot::with_incidents(vec![persisted.clone()]));
        let dashboard = Dashboard::new(source, snapshot, FormatOptions::default());

        assert!(matches!(dashboard.load().await, Err(DashboardError::Client(_))));
        assert_eq!(dashboard.incidents(), vec![persisted]);
        assert_eq!(dashboard.statistics().open_incidents, 1);
        assert!(!dashboard.is_loading());
    }

    #[tokio::test]
    async fn incidents_fall_back_to_local_copy() {
        let (dashboard, source, _) = build(TestSource::seeded());
        dashboard.submit_draft(fire_draft()).await.unwrap();

        source.fail_incidents.store(true, Ordering::SeqCst);
        let report = dashboard.refresh().await.unwrap();
        assert!(report.incidents_from_snapshot);
        assert_eq!(dashboard.incidents().len(), 1);
        assert_eq!(report.statistics.total_resources, 25);
    }

    #[tokio::test]
    async fn refresh_is_idempotent() {
        let (dashboard, _, _) = build(TestSource::seeded());
        dashboard.refresh().await.unwrap();
        let first_resources = dashboard.resources(CategoryFilter::All);
        let first_stats = dashboard.statistics();

        let report = dashboard.refresh().await.unwrap();
        assert_eq!(dashboard.resources(CategoryFilter::All), first_resources);
        assert_eq!(report.statistics, first_stats);
        assert_eq!(report.revision, 2);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_collections() {
        let (dashboard, source, _) = build(TestSource::seeded());
        dashboard.refresh().await.unwrap();
        let revision = dashboard.revision();

        source.fail_fetch.store(true, Ordering::SeqCst);
        assert!(matches!(dashboard.refresh().await, Err(DashboardError::Client(_))));
        assert_eq!(dashboard.revision(), revision);
        assert_eq!(dashboard.statistics().total_resources, 25);
        assert!(!dashboard.is_loading());
    }

    #[tokio::test]
    async fn fire_submission_appears_everywhere() {
        let (dashboard, _, snapshot) = build(TestSource::seeded());
        dashboard.load().await.unwrap();
        let mut changes = dashboard.subscribe();

        dashboard.open_intake();
        let stored = dashboard.submit_draft(fire_draft()).await.unwrap();

        assert_eq!(stored.title_he, "שריפה");
        assert_eq!(stored.kind, IncidentType::Fire);
        assert_eq!(stored.status, IncidentStatus::Open);
        assert_eq!(stored.priority, Priority::Medium);
        assert_eq!(stored.reported_by, "anonymous");

        assert_eq!(dashboard.statistics().open_incidents, 1);
        assert!(changes.has_changed().unwrap());
        assert_eq!(*changes.borrow_and_update(), dashboard.revision());
        assert_eq!(snapshot.load(), vec![stored.clone()]);

        let layer = dashboard.layer(CategoryFilter::All, Locale::He);
        let marker = layer.incidents.iter().find(|m| m.key == stored.id).unwrap();
        assert_eq!(marker.position, Coordinate::new(32.08, 34.78));
        assert_eq!(marker.detail.heading, "שריפה");

        let form = dashboard.intake();
        assert!(!form.open);
        assert_eq!(form.draft, IncidentDraft::default());
    }

    #[tokio::test]
    async fn failed_submission_keeps_draft() {
        let source = TestSource::seeded();
        source.fail_submit.store(true, Ordering::SeqCst);
        let (dashboard, _, snapshot) = build(source);
        dashboard.load().await.unwrap();
        let revision = dashboard.revision();

        assert!(dashboard.submit_draft(fire_draft()).await.is_err());

        let form = dashboard.intake();
        assert!(form.open);
        assert_eq!(form.draft, fire_draft());
        assert!(form.error.is_some());
        assert_eq!(dashboard.revision(), revision);
        assert!(dashboard.incidents().is_empty());
        assert!(snapshot.load().is_empty());
    }

    #[tokio::test]
    async fn invalid_draft_is_not_sent() {
        let (dashboard, source, _) = build(TestSource::seeded());
        let err = dashboard
            .submit_draft(IncidentDraft::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::Intake(IntakeError::MissingField("title_he"))));
        assert_eq!(source.submits.load(Ordering::SeqCst), 0);
        assert!(dashboard.intake().open);
    }

    #[tokio::test]
    async fn overlapping_operations_are_rejected() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let source = TestSource {
            pause: Some((entered.clone(), release.clone())),
            ..TestSource::seeded()
        };
        let (dashboard, _, _) = build(source);
        let dashboard = Arc::new(dashboard);

        let task = {
            let dashboard = dashboard.clone();
            tokio::spawn(async move { dashboard.refresh().await })
        };
        entered.notified().await;

        assert!(dashboard.is_loading());
        assert!(matches!(dashboard.refresh().await, Err(DashboardError::Busy)));
        assert!(matches!(
            dashboard.submit_draft(fire_draft()).await,
            Err(DashboardError::Busy)
        ));

        release.notify_one();
        assert!(task.await.unwrap().is_ok());
        assert!(!dashboard.is_loading());
    }

    #[tokio::test]
    async fn dropped_operation_releases_gate() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let source = TestSource {
            pause: Some((entered.clone(), release)),
            ..TestSource::seeded()
        };
        let (dashboard, _, _) = build(source);
        let dashboard = Arc::new(dashboard);

        let task = {
            let dashboard = dashboard.clone();
            tokio::spawn(async move { dashboard.refresh().await })
        };
        entered.notified().await;
        task.abort();
        let _ = task.await;

        assert!(!dashboard.is_loading());
    }

    #[tokio::test]
    async fn medical_filter_view() {
        let (dashboard, _, _) = build(TestSource::seeded());
        dashboard.load().await.unwrap();

        let medical = CategoryFilter::Only(ResourceCategory::Medical);
        dashboard.select_category(medical);
        let view = dashboard.view(None, None);

        assert_eq!(view.filter.selected, medical);
        assert_eq!(view.map.shown, 5);
        assert_eq!(view.map.total, 25);
        assert_eq!(view.map.caption, "מציג 5 משאבים מתוך 25");
        assert!(view.map.layer.resources.iter().all(|m| m.icon.glyph == "plus"));
        assert_eq!(view.map.layer.outages.len(), 2);
        assert_eq!(view.statistics.total_resources, 25);
        assert_eq!(view.header.title, "פלטפורמת חירום ישראל");
        assert!(!view.header.loading);

        let english = dashboard.view(Some(CategoryFilter::All), Some(Locale::En));
        assert_eq!(english.map.shown, 25);
        assert_eq!(english.header.refresh_label, "Refresh");
    }

    #[test]
    fn offline_config_uses_seed_data() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig {
            offline: true,
            snapshot_path: dir.path().join("incidents.json"),
            ..DashboardConfig::default()
        };
        let dashboard = Dashboard::from_config(&config).unwrap();
        assert!(format!("{dashboard:?}").contains("seed data"));
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        let config = DashboardConfig {
            api_url: "not a url".to_string(),
            ..DashboardConfig::default()
        };
        assert!(matches!(
            Dashboard::from_config(&config),
            Err(DashboardError::Client(ClientError::InvalidUrl(_)))
        ));
    }
}
