//! Portal context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use vitaport_core::{
    AccessTokenProvider, AppointmentsService, CredentialStore, DoctorsService, DocumentsService,
    InsuranceService, QueryCache, SessionService, StoreConfig, StoredTokenProvider,
    WaitlistService,
};
use vitaport_domain::{Config, Result};
use vitaport_infra::{
    AppointmentsClient, AuthClient, DoctorsClient, DocumentsClient, FileCredentialStore,
    HttpClient, InsuranceClient, WaitlistClient,
};

const USER_AGENT: &str = concat!("vitaport/", env!("CARGO_PKG_VERSION"));

/// Portal context - holds the query store and every resource service
///
/// One context per process is the intended shape: the query cache inside
/// it is the central state container, and all services share it.
pub struct PortalContext {
    pub config: Config,
    pub cache: Arc<QueryCache>,
    pub session: Arc<SessionService>,
    pub appointments: Arc<AppointmentsService>,
    pub doctors: Arc<DoctorsService>,
    pub insurance: Arc<InsuranceService>,
    pub documents: Arc<DocumentsService>,
    pub waitlist: Arc<WaitlistService>,
}

impl PortalContext {
    /// Initialize the context with the file-backed credential store from
    /// the configuration
    ///
    /// # Errors
    /// Fails when the credential file exists but is unreadable or when
    /// the HTTP client cannot be constructed.
    pub fn init(config: Config) -> Result<Self> {
        let credentials: Arc<dyn CredentialStore> =
            Arc::new(FileCredentialStore::open(config.storage.credentials_path.clone())?);
        Self::with_credential_store(config, credentials)
    }

    /// Initialize with an injected credential store (tests, embedders)
    pub fn with_credential_store(
        config: Config,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.http.timeout_seconds))
            .max_attempts(config.http.max_attempts)
            .user_agent(USER_AGENT)
            .build()?;

        let tokens: Arc<dyn AccessTokenProvider> =
            Arc::new(StoredTokenProvider::new(credentials.clone()));
        let cache = Arc::new(QueryCache::new(StoreConfig::from(&config.cache)));
        let base_url = config.api.base_url.as_str();

        let auth = Arc::new(AuthClient::new(base_url, http.clone(), tokens.clone()));
        let appointments =
            Arc::new(AppointmentsClient::new(base_url, http.clone(), tokens.clone()));
        let doctors = Arc::new(DoctorsClient::new(base_url, http.clone(), tokens.clone()));
        let insurance = Arc::new(InsuranceClient::new(base_url, http.clone(), tokens.clone()));
        let documents = Arc::new(DocumentsClient::new(base_url, http.clone(), tokens.clone()));
        let waitlist = Arc::new(WaitlistClient::new(base_url, http, tokens));

        let context = Self {
            session: Arc::new(SessionService::new(auth, credentials, cache.clone())),
            appointments: Arc::new(AppointmentsService::new(appointments, cache.clone())),
            doctors: Arc::new(DoctorsService::new(doctors, cache.clone())),
            insurance: Arc::new(InsuranceService::new(insurance, cache.clone())),
            documents: Arc::new(DocumentsService::new(documents, cache.clone())),
            waitlist: Arc::new(WaitlistService::new(waitlist, cache.clone())),
            cache,
            config,
        };

        tracing::info!(base_url = %context.config.api.base_url, "portal context initialized");
        Ok(context)
    }
}
