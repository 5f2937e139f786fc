// entropy-analyzer-core/src/strategies/contextual.rs
//! Language-model rating of text unpredictability, with a local fallback.

use log::{debug, warn};
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

use super::expect_text;
use super::text::TextEntropy;
use crate::config::{AnalyzerConfig, JudgeConfig};
use crate::datum::Datum;
use crate::errors::{EntropyError, JudgeError};
use crate::judge::{parse_rating, JudgeClient, JudgeRequest, OpenAiJudge};
use crate::strategy::{EntropyStrategy, StrategyKind};

/// Asks a judge to rate a string from 0 to 10 and scales the answer into
/// `[0.0, 1.0]`.
///
/// Any judge failure (missing credentials, transport error, timeout, non-2xx
/// status, or a reply that is not a rating) is logged and answered with
/// [`TextEntropy`] on the same input, so scoring never fails for a valid string.
///
/// Without an injected judge, an [`OpenAiJudge`] is built on first use and
/// reused by every clone. That judge is blocking: when scoring is called from
/// a thread inside a tokio runtime context it is not used, and the fallback
/// answers instead. Async callers that want model ratings should use
/// [`crate::llm::AsyncLlm`] directly. A strategy holding a built judge must not
/// be dropped inside a runtime either.
#[derive(Clone)]
pub struct ContextualEntropy {
    judge: Option<Arc<dyn JudgeClient>>,
    default_judge: Arc<OnceCell<OpenAiJudge>>,
    judge_config: JudgeConfig,
    fallback: TextEntropy,
}

impl ContextualEntropy {
    /// A strategy that builds an [`OpenAiJudge`] from the default settings on first use.
    pub fn new() -> Self {
        Self::from_config(&AnalyzerConfig::default())
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self {
            judge: None,
            default_judge: Arc::new(OnceCell::new()),
            judge_config: config.judge.clone(),
            fallback: TextEntropy::with_normalization(config.normalization()),
        }
    }

    /// Uses `judge` for every rating instead of building a client.
    pub fn with_judge(mut self, judge: Arc<dyn JudgeClient>) -> Self {
        self.judge = Some(judge);
        self
    }

    pub fn score(&self, text: Option<&str>) -> f64 {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return 0.0;
        };
        match self.rate(text) {
            Ok(score) => {
                debug!("Contextual entropy: judge rated {:.2}", score);
                score
            }
            Err(err) => {
                warn!("Contextual judge unavailable ({}); falling back to character entropy.", err);
                self.fallback.score(Some(text))
            }
        }
    }

    /// The external path alone: one judge request, no fallback.
    pub fn rate(&self, text: &str) -> Result<f64, JudgeError> {
        let request = JudgeRequest::rating(self.judge_config.system_prompt(), text);
        let reply = match &self.judge {
            Some(judge) => judge.complete(&request)?,
            None => self.default_judge()?.complete(&request)?,
        };
        parse_rating(&reply)
    }

    fn default_judge(&self) -> Result<&OpenAiJudge, JudgeError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(JudgeError::AsyncContext);
        }
        // Only a successful build is cached, so a key exported later is still picked up.
        self.default_judge
            .get_or_try_init(|| OpenAiJudge::from_config(&self.judge_config))
    }
}

impl Default for ContextualEntropy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContextualEntropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextualEntropy")
            .field("judge", &self.judge.as_ref().map(|_| "<injected>"))
            .field("default_judge_built", &self.default_judge.get().is_some())
            .field("model", &self.judge_config.model())
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl EntropyStrategy for ContextualEntropy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Contextual
    }

    fn compute_entropy(&self, data: Option<&Datum>) -> Result<f64, EntropyError> {
        let text = expect_text(data)?;
        Ok(self.score(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedJudge {
        reply: Result<String, JudgeError>,
        calls: AtomicUsize,
    }

    impl FixedJudge {
        fn new(reply: Result<&str, JudgeError>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string),
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl JudgeClient for FixedJudge {
        fn complete(&self, request: &JudgeRequest) -> Result<String, JudgeError> {
            assert_eq!(request.max_tokens, 1);
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    #[test]
    fn uses_judge_rating() {
        let judge = FixedJudge::new(Ok("7"));
        let strategy = ContextualEntropy::new().with_judge(judge.clone());
        assert_eq!(strategy.score(Some("anything")), 0.7);
        assert_eq!(judge.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn absent_input_never_calls_judge() {
        let judge = FixedJudge::new(Ok("9"));
        let strategy = ContextualEntropy::new().with_judge(judge.clone());
        assert_eq!(strategy.compute_entropy(None).unwrap(), 0.0);
        assert_eq!(strategy.score(Some("")), 0.0);
        assert_eq!(judge.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn failures_fall_back_to_text_entropy() {
        let expected = TextEntropy::new().score(Some("hello world"));
        for reply in [
            Err(JudgeError::Timeout),
            Err(JudgeError::Status(500)),
            Ok("not a number"),
            Ok("42"),
        ] {
            let strategy = ContextualEntropy::new().with_judge(FixedJudge::new(reply));
            assert_eq!(strategy.score(Some("hello world")), expected);
        }
    }

    #[test]
    fn rejects_non_string() {
        let strategy = ContextualEntropy::new().with_judge(FixedJudge::new(Ok("5")));
        let err = strategy.compute_entropy(Some(&Datum::List(vec![]))).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
