use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::api::InfoApi;
use crate::error::{FetchError, InfoError};
use crate::models::{VideoInfo, VideoQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of calls, including the first one.
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 2,
            delay: Duration::from_millis(1500),
        }
    }
}

/// Wait between attempts. Swapped out in tests so no real timer runs.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Progress reported to the UI while a lookup runs. Every lookup that gets
/// past validation ends with exactly one `Loaded` or `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    Retrying { failed: u32, max: u32 },
    Loaded(VideoInfo),
    Failed(FetchError),
}

pub struct InfoFetcher {
    api: Arc<dyn InfoApi>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
}

impl InfoFetcher {
    pub fn new(api: Arc<dyn InfoApi>, sleeper: Arc<dyn Sleeper>, policy: RetryPolicy) -> Self {
        Self {
            api,
            sleeper,
            policy,
        }
    }

    pub async fn fetch_video_info(
        &self,
        raw_url: &str,
        mut emit: impl FnMut(FetchEvent) + Send,
    ) -> Result<VideoInfo, InfoError> {
        let query = VideoQuery::parse(raw_url)?;
        let max = self.policy.attempts.max(1);
        let mut attempt = 1;

        loop {
            log::debug!("get-info attempt {attempt}/{max} for {}", query.url());
            match self.api.get_info(query.url()).await {
                Ok(info) => {
                    log::info!(
                        "loaded \"{}\" with {} formats",
                        info.title,
                        info.formats.len()
                    );
                    emit(FetchEvent::Loaded(info.clone()));
                    return Ok(info);
                }
                Err(err) => {
                    log::warn!("get-info attempt {attempt}/{max} failed: {err}");
                    if attempt >= max {
                        let error = FetchError {
                            message: err.user_message(),
                            attempts: attempt,
                        };
                        emit(FetchEvent::Failed(error.clone()));
                        return Err(error.into());
                    }
                    emit(FetchEvent::Retrying { failed: attempt, max });
                    self.sleeper.sleep(self.policy.delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AttemptError, ValidationError};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedApi {
        replies: Mutex<VecDeque<Result<VideoInfo, AttemptError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedApi {
        fn new(replies: Vec<Result<VideoInfo, AttemptError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InfoApi for ScriptedApi {
        async fn get_info(&self, url: &str) -> Result<VideoInfo, AttemptError> {
            self.calls.lock().unwrap().push(url.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AttemptError::Transport("script exhausted".into())))
        }
    }

    #[derive(Default)]
    struct RecordingSleeper {
        waits: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.waits.lock().unwrap().push(duration);
        }
    }

    fn sample_info() -> VideoInfo {
        VideoInfo {
            title: "Clip".into(),
            uploader: "someone".into(),
            platform: "youtube".into(),
            thumbnail: "https://img/x.jpg".into(),
            formats: Vec::new(),
            duration: None,
            view_count: None,
        }
    }

    fn server_error(message: &str) -> AttemptError {
        AttemptError::Server {
            status: 400,
            message: Some(message.into()),
        }
    }

    fn fetcher(api: Arc<ScriptedApi>, sleeper: Arc<RecordingSleeper>) -> InfoFetcher {
        InfoFetcher::new(api, sleeper, RetryPolicy::default())
    }

    #[tokio::test]
    async fn malformed_urls_never_reach_the_network() {
        let api = ScriptedApi::new(vec![]);
        let sleeper = Arc::new(RecordingSleeper::default());
        let fetcher = fetcher(api.clone(), sleeper.clone());

        for (raw, expected) in [
            ("", ValidationError::Empty),
            ("  ", ValidationError::Empty),
            ("youtube.com/watch?v=1", ValidationError::MissingScheme),
        ] {
            let mut events = Vec::new();
            let err = fetcher
                .fetch_video_info(raw, |e| events.push(e))
                .await
                .unwrap_err();
            assert_eq!(err, InfoError::Validation(expected));
            assert!(events.is_empty());
        }
        assert!(api.calls().is_empty());
        assert!(sleeper.waits.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn two_failures_exhaust_with_last_message() {
        let api = ScriptedApi::new(vec![Err(server_error("first")), Err(server_error("second"))]);
        let sleeper = Arc::new(RecordingSleeper::default());
        let fetcher = fetcher(api.clone(), sleeper.clone());

        let mut events = Vec::new();
        let err = fetcher
            .fetch_video_info("https://youtu.be/abc", |e| events.push(e))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            InfoError::Fetch(FetchError {
                message: "second".into(),
                attempts: 2
            })
        );
        assert_eq!(api.calls(), vec!["https://youtu.be/abc"; 2]);
        assert_eq!(
            *sleeper.waits.lock().unwrap(),
            vec![Duration::from_millis(1500)]
        );
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], FetchEvent::Retrying { failed: 1, max: 2 });
        assert!(matches!(&events[1], FetchEvent::Failed(e) if e.message == "second"));
    }

    #[tokio::test]
    async fn failure_then_success_reports_loaded() {
        let api = ScriptedApi::new(vec![
            Err(AttemptError::Transport("reset".into())),
            Ok(sample_info()),
        ]);
        let sleeper = Arc::new(RecordingSleeper::default());
        let fetcher = fetcher(api.clone(), sleeper.clone());

        let mut events = Vec::new();
        let info = fetcher
            .fetch_video_info("http://example.com/v", |e| events.push(e))
            .await
            .unwrap();

        assert_eq!(info.title, "Clip");
        assert_eq!(api.calls().len(), 2);
        let terminal = events
            .iter()
            .filter(|e| !matches!(e, FetchEvent::Retrying { .. }))
            .count();
        assert_eq!(terminal, 1);
        assert_eq!(events.last(), Some(&FetchEvent::Loaded(sample_info())));
    }

    #[tokio::test]
    async fn transport_failure_uses_generic_message() {
        let api = ScriptedApi::new(vec![]);
        let sleeper = Arc::new(RecordingSleeper::default());
        let fetcher = fetcher(api, sleeper);

        let err = fetcher
            .fetch_video_info("https://example.com", |_| {})
            .await
            .unwrap_err();
        match err {
            InfoError::Fetch(e) => assert_eq!(e.message, crate::error::GENERIC_FETCH_MESSAGE),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn single_attempt_policy_does_not_wait() {
        let api = ScriptedApi::new(vec![Err(server_error("nope"))]);
        let sleeper = Arc::new(RecordingSleeper::default());
        let fetcher = InfoFetcher::new(
            api.clone(),
            sleeper.clone(),
            RetryPolicy {
                attempts: 1,
                delay: Duration::from_millis(1500),
            },
        );

        assert!(fetcher.fetch_video_info("https://example.com", |_| {}).await.is_err());
        assert_eq!(api.calls().len(), 1);
        assert!(sleeper.waits.lock().unwrap().is_empty());
    }
}
