//! Trigger dispatcher.
//!
//! Turns a control's kind and label into a POST against the presentation
//! API and reports the result as a [`Notice`]. Dispatches share nothing
//! mutable, so any number may run concurrently; no ordering between them
//! is guaranteed.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use showcue_core::config::{RemoteConfig, ShowcueConfig};
use showcue_core::TriggerKind;
use showcue_scan::Control;
use url::Url;

use crate::endpoint;
use crate::error::DispatchError;
use crate::notice::{Notice, Notifier};

/// Result of one dispatch. Always produced; a dispatch never errors out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Success {
        kind: TriggerKind,
        label: String,
        status: u16,
    },
    Failure {
        kind: TriggerKind,
        label: String,
        error: DispatchError,
    },
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Success { .. })
    }

    pub fn error(&self) -> Option<&DispatchError> {
        match self {
            DispatchOutcome::Success { .. } => None,
            DispatchOutcome::Failure { error, .. } => Some(error),
        }
    }
}

/// Sends triggers to the configured endpoint.
///
/// Cheap to clone: clones share the HTTP connection pool and notifier.
#[derive(Clone)]
pub struct Dispatcher {
    client: reqwest::Client,
    remote: RemoteConfig,
    notice_timeout: Duration,
    notifier: Arc<dyn Notifier>,
}

impl Dispatcher {
    /// Build a dispatcher from the loaded configuration.
    ///
    /// The endpoint is not validated here; a bad endpoint surfaces as a
    /// failed dispatch so the user sees it when they click.
    pub fn new(config: &ShowcueConfig, notifier: Arc<dyn Notifier>) -> Result<Self, DispatchError> {
        let mut builder = reqwest::Client::builder();
        if config.remote.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.remote.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| DispatchError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            remote: config.remote.clone(),
            notice_timeout: Duration::from_secs(config.general.notice_secs),
            notifier,
        })
    }

    /// The URL a trigger would be sent to.
    pub fn target_for(&self, kind: TriggerKind, label: &str) -> Result<Url, DispatchError> {
        let base = endpoint::resolve_base(&self.remote.endpoint)?;
        Ok(endpoint::build_target(
            &base,
            self.remote.action_for(kind),
            label,
        ))
    }

    /// Send one trigger and return the response status.
    ///
    /// Does not notify; use [`Dispatcher::dispatch`] for the user-facing path.
    pub async fn send(&self, kind: TriggerKind, label: &str) -> Result<u16, DispatchError> {
        let target = self.target_for(kind, label)?;
        tracing::debug!(%kind, target = %target, "Sending trigger");

        let response = self
            .client
            .post(target)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| DispatchError::from_transport(&e))?;

        let status = response.status();
        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(DispatchError::HttpStatus(status.as_u16()))
        }
    }

    /// Send one trigger and surface the outcome as a notice.
    pub async fn dispatch(&self, kind: TriggerKind, label: &str) -> DispatchOutcome {
        let label = label.trim().to_string();
        match self.send(kind, &label).await {
            Ok(status) => {
                tracing::info!(%kind, label = %label, status, "Trigger sent");
                self.notifier.notify(Notice::success(
                    format!("{} selected: {}", kind.title(), label),
                    self.notice_timeout,
                ));
                DispatchOutcome::Success {
                    kind,
                    label,
                    status,
                }
            }
            Err(error) => {
                tracing::warn!(%kind, label = %label, error = %error, "Trigger failed");
                self.notifier.notify(Notice::failure(
                    format!("Could not select {} \"{}\": {}", kind, label, error),
                    self.notice_timeout * 2,
                ));
                DispatchOutcome::Failure { kind, label, error }
            }
        }
    }

    /// Activate a generated control.
    pub async fn activate(&self, control: &Control) -> DispatchOutcome {
        self.dispatch(control.kind, &control.label).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::{ChannelNotifier, LogNotifier, NoticeLevel};
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(endpoint: &str) -> ShowcueConfig {
        let mut config = ShowcueConfig::default();
        config.remote.endpoint = endpoint.to_string();
        config
    }

    fn dispatcher(
        endpoint: &str,
    ) -> (Dispatcher, tokio::sync::mpsc::UnboundedReceiver<Notice>) {
        let (notifier, rx) = ChannelNotifier::channel();
        let d = Dispatcher::new(&config_for(endpoint), Arc::new(notifier)).unwrap();
        (d, rx)
    }

    #[test]
    fn test_target_for_default_config() {
        let (d, _rx) = dispatcher("");
        let target = d.target_for(TriggerKind::Slide, "Intro").unwrap();
        assert_eq!(
            target.as_str(),
            "http://localhost:5505/?action=name_select_slide&data=%7B%22value%22%3A%22Intro%22%7D"
        );
    }

    #[test]
    fn test_target_for_show_uses_show_action() {
        let (d, _rx) = dispatcher("");
        let target = d.target_for(TriggerKind::Show, "Sunday").unwrap();
        assert!(target.as_str().contains("action=name_select_show"));
    }

    #[test]
    fn test_blank_action_identifiers_use_defaults() {
        let mut config = ShowcueConfig::default();
        config.remote.show_action = String::new();
        config.remote.slide_action = "   ".to_string();
        let d = Dispatcher::new(&config, Arc::new(LogNotifier)).unwrap();

        let show = d.target_for(TriggerKind::Show, "Sunday").unwrap();
        assert!(show.as_str().contains("action=name_select_show&"));
        let slide = d.target_for(TriggerKind::Slide, "Intro").unwrap();
        assert!(slide.as_str().contains("action=name_select_slide&"));
    }

    #[tokio::test]
    async fn test_dispatch_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(query_param("action", "name_select_slide"))
            .and(query_param("data", r#"{"value":"Intro"}"#))
            .and(header("content-type", "application/json"))
            .and(body_string(""))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (d, mut rx) = dispatcher(&server.uri());
        let outcome = d.dispatch(TriggerKind::Slide, " Intro ").await;

        assert_eq!(
            outcome,
            DispatchOutcome::Success {
                kind: TriggerKind::Slide,
                label: "Intro".to_string(),
                status: 200,
            }
        );
        let notice = rx.try_recv().unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.message, "Slide selected: Intro");
        assert_eq!(notice.timeout, Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_any_2xx_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let (d, _rx) = dispatcher(&server.uri());
        assert_eq!(d.send(TriggerKind::Show, "Evening").await, Ok(204));
    }

    #[tokio::test]
    async fn test_server_error_is_http_status_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let (d, mut rx) = dispatcher(&server.uri());
        let outcome = d.dispatch(TriggerKind::Show, "Sunday").await;

        assert_eq!(outcome.error(), Some(&DispatchError::HttpStatus(500)));
        let notice = rx.try_recv().unwrap();
        assert!(notice.is_failure());
        assert_eq!(
            notice.message,
            "Could not select show \"Sunday\": HTTP status 500"
        );
        assert_eq!(notice.timeout, Duration::from_secs(6));
    }

    #[tokio::test]
    async fn test_client_error_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (d, _rx) = dispatcher(&server.uri());
        assert_eq!(
            d.send(TriggerKind::Slide, "x").await,
            Err(DispatchError::HttpStatus(404))
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let (d, mut rx) = dispatcher(&format!("127.0.0.1:{}", port));
        let outcome = d.dispatch(TriggerKind::Slide, "Intro").await;

        assert!(matches!(outcome.error(), Some(DispatchError::Network(_))));
        assert!(rx.try_recv().unwrap().is_failure());
    }

    #[tokio::test]
    async fn test_bad_endpoint_fails_without_request() {
        let (d, mut rx) = dispatcher("exa mple.com:5505");
        let outcome = d.dispatch(TriggerKind::Slide, "Intro").await;

        assert!(matches!(
            outcome.error(),
            Some(DispatchError::Configuration(_))
        ));
        let notice = rx.try_recv().unwrap();
        assert!(notice.message.contains("Configuration error"));
    }

    #[tokio::test]
    async fn test_activate_control() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(query_param("action", "name_select_show"))
            .and(query_param("data", r#"{"value":"Morning"}"#))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (d, _rx) = dispatcher(&server.uri());
        let control = Control::new(TriggerKind::Show, "Morning");
        assert!(d.activate(&control).await.is_success());
    }

    #[tokio::test]
    async fn test_failure_does_not_disable_later_dispatches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(query_param("data", r#"{"value":"bad"}"#))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(query_param("data", r#"{"value":"good"}"#))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let (d, _rx) = dispatcher(&server.uri());
        assert!(!d.dispatch(TriggerKind::Slide, "bad").await.is_success());
        assert!(d.dispatch(TriggerKind::Slide, "good").await.is_success());
    }

    #[tokio::test]
    async fn test_custom_action_identifiers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(query_param("action", "id_select_slide"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = config_for(&server.uri());
        config.remote.slide_action = "id_select_slide".to_string();
        let (notifier, _rx) = ChannelNotifier::channel();
        let d = Dispatcher::new(&config, Arc::new(notifier)).unwrap();
        assert!(d.dispatch(TriggerKind::Slide, "x").await.is_success());
    }
}
