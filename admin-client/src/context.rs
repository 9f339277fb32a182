//! Admin context - composition root
//!
//! Owns the session, rights cache, resolver, activity logger and mutation
//! pipeline for one running admin client. Pages receive the resolver and
//! pipeline from here instead of reading global state.

use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::activity::{ActivityLogger, ActivitySink, ActivityWorker};
use crate::http::NetworkHttpClient;
use crate::mutation::MutationPipeline;
use crate::rights::{RightsCache, RightsSource, RoleRightsResolver};
use crate::session::SessionState;
use crate::{ClientConfig, ClientResult};

pub struct AdminContext {
    http: Option<Arc<NetworkHttpClient>>,
    session: Arc<SessionState>,
    resolver: RoleRightsResolver,
    pipeline: MutationPipeline,
    worker: JoinHandle<()>,
}

impl std::fmt::Debug for AdminContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminContext")
            .field("session", &self.session)
            .field("rights", self.resolver.cache())
            .finish_non_exhaustive()
    }
}

impl AdminContext {
    /// Build against the REST backend described by `config`
    ///
    /// Must be called inside a Tokio runtime (spawns the activity worker).
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let session = match &config.session_dir {
            Some(dir) => SessionState::persistent(dir)?,
            None => SessionState::in_memory(),
        };
        let session = Arc::new(session);

        let http = Arc::new(NetworkHttpClient::new(config)?);
        if let Some(token) = session.token() {
            http.set_token(Some(token));
        }

        let mut ctx = Self::with_parts(
            session,
            http.clone(),
            http.clone(),
            config.activity_buffer,
        );
        ctx.http = Some(http);
        Ok(ctx)
    }

    /// Build from injected collaborators
    pub fn with_parts(
        session: Arc<SessionState>,
        rights_source: Arc<dyn RightsSource>,
        activity_sink: Arc<dyn ActivitySink>,
        activity_buffer: usize,
    ) -> Self {
        let cache = RightsCache::new(rights_source);
        let resolver = RoleRightsResolver::new(cache, session.clone());

        let (logger, rx) = ActivityLogger::new(activity_buffer);
        let worker = tokio::spawn(ActivityWorker::new(activity_sink).run(rx));
        let pipeline = MutationPipeline::new(logger, session.clone());

        Self {
            http: None,
            session,
            resolver,
            pipeline,
            worker,
        }
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    pub fn resolver(&self) -> &RoleRightsResolver {
        &self.resolver
    }

    pub fn pipeline(&self) -> &MutationPipeline {
        &self.pipeline
    }

    /// Explicit session-start load of the rights table
    pub async fn ensure_rights_loaded(&self) -> ClientResult<()> {
        self.resolver.cache().ensure_loaded().await
    }

    /// Authenticate against the backend, store the session and load rights
    ///
    /// A rights load failure does not fail the login; pages stay denied
    /// until a later load succeeds.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<()> {
        let http = self.http.as_ref().ok_or_else(|| {
            crate::ClientError::Internal("login requires a network client".into())
        })?;

        let resp = http.login(username, password).await?;
        http.set_token(Some(resp.token.clone()));
        self.session.set_login(resp.token, resp.user)?;
        tracing::info!(username = %username, "Logged in");

        if let Err(e) = self.ensure_rights_loaded().await {
            tracing::warn!("Role rights unavailable after login: {}", e);
        }
        Ok(())
    }

    /// Clear the session and token and empty the rights cache
    pub fn logout(&self) -> ClientResult<()> {
        if let Some(http) = &self.http {
            http.set_token(None);
        }
        self.session.clear()?;
        self.resolver.cache().reset();
        tracing::info!("Logged out");
        Ok(())
    }

    /// Stop accepting activity entries and wait for queued ones to flush
    pub async fn shutdown(self) {
        let Self {
            pipeline, worker, ..
        } = self;
        drop(pipeline);
        if let Err(e) = worker.await {
            tracing::error!("Activity worker terminated abnormally: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::{Change, Section};
    use crate::{ClientError, rights::DerivedPermission};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use shared::{ActivityLogEntry, PagePermission, RoleRightsEntry, SessionUser, pages};

    struct FixedRights;

    #[async_trait]
    impl RightsSource for FixedRights {
        async fn fetch_rights(&self) -> ClientResult<Vec<RoleRightsEntry>> {
            Ok(vec![RoleRightsEntry::new(
                "EDITOR",
                vec![PagePermission::new(pages::ABOUT_SECTION, true, true, false)],
            )])
        }
    }

    #[derive(Default)]
    struct FailingSink {
        seen: Mutex<Vec<ActivityLogEntry>>,
    }

    #[async_trait]
    impl ActivitySink for FailingSink {
        async fn write(&self, entry: &ActivityLogEntry) -> ClientResult<()> {
            self.seen.lock().push(entry.clone());
            Err(ClientError::Internal("activity log down".into()))
        }
    }

    #[tokio::test]
    async fn test_create_about_logs_once_even_when_sink_fails() {
        let session = Arc::new(SessionState::in_memory());
        session
            .set_login("t", SessionUser::new("9", "editor", "EDITOR"))
            .unwrap();
        let sink = Arc::new(FailingSink::default());
        let ctx = AdminContext::with_parts(session, Arc::new(FixedRights), sink.clone(), 8);

        ctx.ensure_rights_loaded().await.unwrap();
        let permission = ctx.resolver().resolve(pages::ABOUT_SECTION);
        assert!(!permission.is_form_disabled);

        let created = ctx
            .pipeline()
            .run_gated(
                &permission,
                Change::create(Section::About).subject("Who we are"),
                async { Ok::<_, ClientError>("about:1") },
            )
            .await;
        assert_eq!(created.unwrap(), "about:1");

        ctx.shutdown().await;
        let seen = sink.seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].section, "About");
        assert!(!seen[0].message.is_empty());
    }

    #[tokio::test]
    async fn test_logout_resets_rights() {
        let session = Arc::new(SessionState::in_memory());
        session
            .set_login("t", SessionUser::new("9", "editor", "EDITOR"))
            .unwrap();
        let ctx = AdminContext::with_parts(
            session,
            Arc::new(FixedRights),
            Arc::new(FailingSink::default()),
            8,
        );
        ctx.ensure_rights_loaded().await.unwrap();

        ctx.logout().unwrap();
        assert!(ctx.resolver().cache().snapshot().is_empty());
        assert_eq!(
            ctx.resolver().resolve(pages::ABOUT_SECTION),
            DerivedPermission::DENIED
        );
    }

    #[tokio::test]
    async fn test_login_without_network_client_errors() {
        let ctx = AdminContext::with_parts(
            Arc::new(SessionState::in_memory()),
            Arc::new(FixedRights),
            Arc::new(FailingSink::default()),
            8,
        );
        assert!(matches!(
            ctx.login("a", "b").await,
            Err(ClientError::Internal(_))
        ));
    }
}
