use std::cmp::Ordering;

use tracing::{debug, error, info, warn};

use crate::models::api::{PrepareRequest, PrepareResponse, SubmitResponse, VersionRequest};
use crate::models::session::{ActionSession, FormState, UiState, VersionPart};
use crate::models::view::{VersionWarning, ViewState, NO_QUESTIONNAIRE_VERSION, NO_SUBMITTED_VERSION};
use crate::services::action_client::ActionBackend;
use crate::services::host::Host;
use crate::utils::error::Result;
use crate::utils::version::{self, BumpKind, Suggestions, Version};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load versions. Please try again later.";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save version. Please try again later.";
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to submit version. Please try again later.";
pub const SAVE_IN_PROGRESS_MESSAGE: &str = "Saving the new version...";
pub const SUBMIT_IN_PROGRESS_MESSAGE: &str =
    "Saving the new version, generating and submitting the nanopublication. This may take a while...";
pub const CANCELLED_MESSAGE: &str = "FIP version action has been closed by the user.";
pub const CLOSED_AFTER_ERROR_MESSAGE: &str =
    "FIP version action has been closed by the user after encountering an error.";

/// Drives one activation of the action: host handshake, form state, and the
/// save/submit flows.
///
/// Every handler takes `&mut self`, so at most one request is in flight and
/// confirm/submit are only accepted while the form is ready.
pub struct ActionController<B, H> {
    backend: B,
    host: H,
    session: Option<ActionSession>,
    view: ViewState,
    latest_submitted: Option<Version>,
    started: bool,
    revalidate_on_suggestion: bool,
}

impl<B: ActionBackend, H: Host> ActionController<B, H> {
    pub fn new(backend: B, host: H) -> Self {
        Self {
            backend,
            host,
            session: None,
            view: ViewState::loading(),
            latest_submitted: None,
            started: false,
            revalidate_on_suggestion: true,
        }
    }

    /// Whether a suggestion click re-runs the version check immediately.
    /// Without it the check only runs on the next field change.
    #[must_use]
    pub fn with_revalidate_on_suggestion(mut self, revalidate: bool) -> Self {
        self.revalidate_on_suggestion = revalidate;
        self
    }

    pub fn state(&self) -> UiState {
        match &self.session {
            Some(session) => session.state,
            None if self.started => UiState::Loading,
            None => UiState::Idle,
        }
    }

    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn form(&self) -> Option<&FormState> {
        self.session.as_ref().map(|session| &session.form)
    }

    pub const fn latest_submitted(&self) -> Option<&Version> {
        self.latest_submitted.as_ref()
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_host(self) -> H {
        self.host
    }

    fn set_state(&mut self, state: UiState) {
        if let Some(session) = self.session.as_mut() {
            debug!(from = %session.state, to = %state, "action state change");
            session.state = state;
        }
    }

    /// Start the action: host handshake, then load the version data.
    ///
    /// A failing host handshake is logged and returned; the view stays on the
    /// loader because there is nothing to recover to.
    pub async fn initialize(&mut self) -> Result<UiState> {
        if self.started {
            debug!("initialize called twice, ignoring");
            return Ok(self.state());
        }
        self.started = true;
        self.view = ViewState::loading();

        let data = match self.host.init().await {
            Ok(data) => data,
            Err(err) => {
                error!(error = %err, "host initialization failed");
                return Err(err);
            }
        };
        info!(project_uuid = %data.project_uuid, "action initialized");
        self.session = Some(ActionSession::new(data));

        self.load_versions().await;
        Ok(self.state())
    }

    async fn load_versions(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let request = PrepareRequest {
            project_uuid: session.project_uuid.clone(),
            user_token: session.user_token.clone(),
        };

        match self.backend.prepare_action(&request).await {
            Ok(response) if response.ok => self.apply_prepared(&response),
            Ok(response) => {
                let detail = response.message.unwrap_or_default();
                warn!(message = %detail, "prepare-action reported a failure");
                self.fail_loading(format!("Failed to load versions: {detail}"));
            }
            Err(err) => {
                warn!(error = %err, "prepare-action request failed");
                self.fail_loading(LOAD_FAILED_MESSAGE.to_string());
            }
        }
    }

    fn apply_prepared(&mut self, response: &PrepareResponse) {
        for record in &response.submitted_versions {
            debug!(
                uri = %record.uri,
                version = ?record.version,
                submitted_at = ?record.submitted_at_utc(),
                "submitted version"
            );
        }

        self.latest_submitted = version::latest_version(&response.submitted_versions);
        let baseline = response.questionnaire_version.as_deref();
        let (form_version, suggestions) = Suggestions::from_baseline(baseline);

        self.view.latest_version_text = self
            .latest_submitted
            .map_or_else(|| NO_SUBMITTED_VERSION.to_string(), |v| v.to_string());
        self.view.current_version_text = baseline
            .filter(|value| !value.is_empty())
            .unwrap_or(NO_QUESTIONNAIRE_VERSION)
            .to_string();
        self.view.suggestions = suggestions;

        if let Some(session) = self.session.as_mut() {
            session.form.set_version(&form_version);
        }

        self.view.loader_visible = false;
        self.view.content_visible = true;
        self.view.clear_error();
        self.view.set_controls_enabled(true);
        self.set_state(UiState::Ready);
        self.validate_form();

        info!(
            latest = %self.view.latest_version_text,
            current = %self.view.current_version_text,
            "action ready"
        );
    }

    fn fail_loading(&mut self, message: String) {
        self.view.loader_visible = false;
        self.view.content_visible = false;
        self.view.set_controls_enabled(false);
        self.view.show_error(message);
        self.set_state(UiState::Error);
    }

    /// Recompute the warning and the confirm/submit gate from the form.
    fn validate_form(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        let warning = match (session.form.candidate(), self.latest_submitted) {
            (None, _) => Some(VersionWarning::Invalid {
                entered: session.form.version_string(),
            }),
            (Some(candidate), Some(latest))
                if version::compare(&candidate, &latest) != Ordering::Greater =>
            {
                Some(VersionWarning::NotHigher {
                    latest: latest.to_string(),
                })
            }
            _ => None,
        };

        self.view.set_actions_enabled(warning.is_none());
        self.view.warning = warning;
    }

    fn accepts_input(&self) -> bool {
        self.state() == UiState::Ready && self.view.inputs_enabled
    }

    /// A version input changed
    pub fn change_version_part(&mut self, part: VersionPart, value: impl Into<String>) -> UiState {
        if !self.accepts_input() {
            debug!(?part, state = %self.state(), "ignoring version change");
            return self.state();
        }
        if let Some(session) = self.session.as_mut() {
            session.form.set_part(part, value);
        }
        self.validate_form();
        self.state()
    }

    /// The description text changed
    pub fn change_description(&mut self, text: impl Into<String>) -> UiState {
        if !self.accepts_input() {
            return self.state();
        }
        if let Some(session) = self.session.as_mut() {
            session.form.description = text.into();
        }
        self.state()
    }

    /// Fill the version inputs from one of the suggestions
    pub fn click_suggestion(&mut self, kind: BumpKind) -> UiState {
        if !self.accepts_input() {
            debug!(?kind, state = %self.state(), "ignoring suggestion click");
            return self.state();
        }
        let suggested = self.view.suggestions.get(kind).to_string();
        if let Some(session) = self.session.as_mut() {
            session.form.fill_dotted(&suggested);
        }
        if self.revalidate_on_suggestion {
            self.validate_form();
        }
        self.state()
    }

    fn version_request(&self) -> Option<VersionRequest> {
        self.session.as_ref().map(|session| VersionRequest {
            project_uuid: session.project_uuid.clone(),
            user_token: session.user_token.clone(),
            version: session.form.version_string(),
            description: session.form.description.clone(),
        })
    }

    fn finish(&mut self, success: bool, message: &str) {
        self.view.stop_processing();
        self.view.set_controls_enabled(false);
        self.host.send_result(success, message);
        self.set_state(UiState::Done);
    }

    fn back_to_form(&mut self, message: String) {
        self.view.stop_processing();
        self.view.set_controls_enabled(true);
        self.view.show_error(message);
        self.set_state(UiState::Ready);
        self.validate_form();
    }

    /// Save the version without publishing it
    pub async fn confirm(&mut self) -> UiState {
        if self.state() != UiState::Ready || !self.view.confirm_enabled {
            debug!(state = %self.state(), "ignoring confirm");
            return self.state();
        }
        let Some(request) = self.version_request() else {
            return self.state();
        };

        info!(version = %request.version, "saving version");
        self.view.start_processing(SAVE_IN_PROGRESS_MESSAGE);
        self.set_state(UiState::Processing);

        match self.backend.save_version(&request).await {
            Ok(response) if response.ok => {
                let message = format!(
                    "FIP version action completed successfully and updated version to **{}**.",
                    request.version
                );
                self.finish(true, &message);
            }
            Ok(response) => {
                let detail = response.message.unwrap_or_default();
                warn!(message = %detail, "save-version reported a failure");
                self.back_to_form(format!("Failed to save version: {detail}"));
            }
            Err(err) => {
                warn!(error = %err, "save-version request failed");
                self.back_to_form(SAVE_FAILED_MESSAGE.to_string());
            }
        }
        self.state()
    }

    /// Save the version, generate the nanopublication and submit it
    pub async fn submit(&mut self) -> UiState {
        if self.state() != UiState::Ready || !self.view.submit_enabled {
            debug!(state = %self.state(), "ignoring submit");
            return self.state();
        }
        let Some(request) = self.version_request() else {
            return self.state();
        };

        info!(version = %request.version, "submitting version");
        self.view.start_processing(SUBMIT_IN_PROGRESS_MESSAGE);
        self.set_state(UiState::Processing);

        match self.backend.submit_version(&request).await {
            Ok(response) => {
                let (success, message) = submit_outcome(&request.version, &response);
                if !success {
                    warn!(
                        document_done = response.is_document_generated(),
                        submission_done = response.is_submitted(),
                        "submission incomplete"
                    );
                }
                self.finish(success, &message);
            }
            Err(err) => {
                warn!(error = %err, "submit-version request failed");
                self.back_to_form(SUBMIT_FAILED_MESSAGE.to_string());
            }
        }
        self.state()
    }

    /// The user dismissed the form
    pub fn cancel(&mut self) -> UiState {
        if self.state() != UiState::Ready || !self.view.cancel_enabled {
            debug!(state = %self.state(), "ignoring cancel");
            return self.state();
        }
        self.finish(false, CANCELLED_MESSAGE);
        self.state()
    }

    /// The user closed the action from the error panel
    pub fn close(&mut self) -> UiState {
        let state = self.state();
        let error_shown = state == UiState::Error || (state == UiState::Ready && self.view.error_visible);
        if !error_shown {
            debug!(state = %state, "ignoring close");
            return state;
        }
        self.finish(false, CLOSED_AFTER_ERROR_MESSAGE);
        self.state()
    }
}

/// Terminal result for a submit-version response
fn submit_outcome(version: &str, response: &SubmitResponse) -> (bool, String) {
    if !response.ok {
        let detail = response.message.as_deref().unwrap_or("unknown error");
        return (false, format!("Failed to submit version: {detail}"));
    }

    if response.is_submitted() {
        let message = match response.submission_location.as_deref() {
            Some(location) if !location.is_empty() => format!(
                "FIP version **{version}** has been saved and submitted successfully as nanopublication: [{location}]({location})."
            ),
            _ => format!("FIP version **{version}** has been saved and submitted successfully."),
        };
        return (true, message);
    }

    if response.is_document_generated() {
        return (
            false,
            format!(
                "FIP version **{version}** has been saved and the nanopublication document was generated, but it could not be submitted. Please submit the document manually."
            ),
        );
    }

    (
        false,
        format!(
            "FIP version **{version}** has been saved, but the nanopublication document could not be generated."
        ),
    )
}
