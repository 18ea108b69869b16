//! The orchestrator the presentation layer drives.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::application::dto::{LoginRequest, ManualEmojiRequest, ManualEmojiResult, SyncReport};
use crate::application::services::{EmojiFetchService, ProgressTracker};
use crate::application::use_cases::{AddManualEmojiUseCase, LoadSessionUseCase, LoginUseCase};
use crate::domain::entities::{Community, Emoji, SessionState};
use crate::domain::errors::PipelineError;
use crate::domain::pipeline::{PipelineState, Stage};
use crate::domain::ports::{AuthPort, EmojiCachePort, EmojiSourcePort, ImageNormalizerPort};

/// Drives login, session load and manual adds, and owns the session state.
///
/// Operations run one at a time; progress is published on a watch channel
/// obtained from [`EmojiPipeline::subscribe`].
pub struct EmojiPipeline {
    login: LoginUseCase,
    load_session: LoadSessionUseCase,
    add_manual: AddManualEmojiUseCase,
    fetcher: EmojiFetchService,
    cache: Arc<dyn EmojiCachePort>,
    session: SessionState,
    progress: ProgressTracker,
    cancel: CancellationToken,
}

impl EmojiPipeline {
    /// Wires the pipeline to its ports.
    #[must_use]
    pub fn new(
        auth: Arc<dyn AuthPort>,
        source: Arc<dyn EmojiSourcePort>,
        cache: Arc<dyn EmojiCachePort>,
        normalizer: Arc<dyn ImageNormalizerPort>,
    ) -> Self {
        Self {
            login: LoginUseCase::new(auth),
            load_session: LoadSessionUseCase::new(source.clone(), cache.clone(), normalizer.clone()),
            add_manual: AddManualEmojiUseCase::new(source.clone(), cache.clone(), normalizer),
            fetcher: EmojiFetchService::new(source, cache.clone()),
            cache,
            session: SessionState::new(),
            progress: ProgressTracker::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Returns a receiver of progress updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.progress.subscribe()
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> PipelineState {
        self.progress.current()
    }

    /// Returns the session's communities, the manual-add one first.
    #[must_use]
    pub fn communities(&self) -> &[Community] {
        self.session.communities()
    }

    /// Returns the session state.
    #[must_use]
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    /// Returns a token that cancels the running operation when triggered.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Returns to `Idle`, keeping the credential and the cache.
    pub fn reset(&mut self) {
        if self.cancel.is_cancelled() {
            self.cancel = CancellationToken::new();
        }
        self.progress.reset();
    }

    /// Logs in. On success the state stays `Authenticating`.
    ///
    /// A finished run (`Ready`, including after a manual add) starts over
    /// from `Idle`.
    ///
    /// # Errors
    /// Returns error if login is not allowed now or the server rejects it.
    pub async fn login(&mut self, request: &LoginRequest) -> Result<(), PipelineError> {
        if self.progress.current() == PipelineState::Ready {
            self.progress.reset();
        }
        self.progress.advance(PipelineState::Authenticating)?;

        let credential = tokio::select! {
            () = self.cancel.cancelled() => Err(PipelineError::Cancelled),
            result = self.login.execute(request) => result.map_err(PipelineError::from),
        }
        .inspect_err(|e| self.progress.fail(Stage::Authenticating, e.to_string()))?;

        self.session.set_credential(credential);
        Ok(())
    }

    /// Uses a token the caller already has instead of logging in.
    ///
    /// # Errors
    /// Returns `Validation` if the token is malformed. State is unchanged.
    pub fn login_with_token(&mut self, raw: &str) -> Result<(), PipelineError> {
        let credential = LoginUseCase::from_token(raw)?;
        self.session.set_credential(credential);
        Ok(())
    }

    /// Lists communities and emoji, fills the cache and normalizes it.
    ///
    /// # Errors
    /// Returns `NotAuthenticated` without a credential; otherwise the first
    /// error that aborts a stage, after which the state is `Failed`.
    pub async fn load_session(&mut self) -> Result<SyncReport, PipelineError> {
        let credential = self
            .session
            .credential()
            .cloned()
            .ok_or(PipelineError::NotAuthenticated)?;

        let report = tokio::select! {
            () = self.cancel.cancelled() => Err(PipelineError::Cancelled),
            result = self.load_session.execute(&credential, &self.progress, &self.cancel) => result,
        }
        .inspect_err(|e| self.fail_current(e))?;

        self.session.replace_communities(report.communities.clone());

        Ok(report)
    }

    /// Logs in unless a credential is already held, then loads the session.
    ///
    /// # Errors
    /// Returns the first login or load error.
    pub async fn run(&mut self, request: &LoginRequest) -> Result<SyncReport, PipelineError> {
        if self.session.is_authenticated() {
            debug!("Credential held, skipping login");
        } else {
            self.login(request).await?;
        }
        self.load_session().await
    }

    /// Adds one emoji by identifier, caching and normalizing just that file.
    ///
    /// # Errors
    /// Returns `Validation` without touching state for a bad identifier;
    /// download and resize errors leave the state `Failed`.
    pub async fn add_manual_emoji(
        &mut self,
        id: &str,
        animated: bool,
    ) -> Result<ManualEmojiResult, PipelineError> {
        let request = ManualEmojiRequest::new(id, animated);

        let result = tokio::select! {
            () = self.cancel.cancelled() => Err(PipelineError::Cancelled),
            result = self.add_manual.execute(&request, &self.progress, &self.cancel) => result,
        }
        .inspect_err(|e| self.fail_current(e))?;

        if !self.session.add_extra_emoji(result.emoji.clone()) {
            debug!(id = %result.emoji.id(), "Manual emoji already listed");
        }
        Ok(result)
    }

    /// Returns the decoded image for display, downloading it first if needed.
    ///
    /// Never fails: download and decode problems are logged and yield None.
    pub async fn fetch_display_image(&self, emoji: &Emoji) -> Option<Arc<image::DynamicImage>> {
        if let Err(e) = self.fetcher.ensure_cached(emoji).await {
            warn!(id = %emoji.id(), error = %e, "Could not fetch emoji for display");
            return None;
        }
        self.cache.load(emoji).await
    }

    fn fail_current(&self, error: &PipelineError) {
        if matches!(
            error,
            PipelineError::InvalidTransition { .. }
                | PipelineError::Validation(_)
                | PipelineError::NotAuthenticated
        ) {
            return;
        }
        match self.progress.current().stage() {
            Some(stage) => self.progress.fail(stage, error.to_string()),
            None => info!(error = %error, "Operation rejected before it started"),
        }
    }
}
