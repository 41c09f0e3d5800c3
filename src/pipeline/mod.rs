//! Two-stage retrieval-and-rerank pipeline over commit history.
//!
//! A run translates the natural-language query into literal keywords,
//! retrieves candidate commits (or takes a user-supplied log as-is), and has
//! the model rerank and explain the best matches. All state transitions are
//! owned by [`Pipeline::run`]; a single run is in flight at a time.

pub mod analyze;
pub mod corpus;
pub mod extract;

use std::fmt;

pub use analyze::CommitAnalysis;

use crate::context::ServiceContext;
use crate::ports::commit_search::RetrievalError;

/// Where the commit corpus for a run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    /// Fetch candidates from the remote commit-search API.
    Remote {
        /// Repository to search, as `owner/name`.
        repo: String,
    },
    /// Analyze user-supplied log text as-is.
    Local {
        /// The raw log text. Treated as an opaque corpus; never parsed.
        log: String,
    },
}

/// One search run: the immutable query plus its corpus source.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// The user's natural-language query.
    pub query: String,
    /// Where the corpus comes from.
    pub source: CorpusSource,
}

/// The pipeline's single active state.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    /// No run has started.
    Idle,
    /// Extracting keywords and retrieving candidates from the remote API.
    FetchingRemote,
    /// The analyzer is reranking the corpus.
    Analyzing,
    /// A run completed; an empty list means no matches, not an error.
    Results(Vec<CommitAnalysis>),
    /// A run failed with a single user-visible message.
    Error(String),
}

/// Error kinds a run can surface.
///
/// Retrieval and analysis failures propagate here; keyword-extraction
/// failures never do (that stage fails open). An empty retrieval is not an
/// error at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// No API key was resolved; nothing was sent over the network.
    MissingApiKey,
    /// The query was blank.
    BlankQuery,
    /// A local source was selected but its log text was blank.
    BlankCorpus,
    /// The search API refused the request (rate limit).
    RateLimited,
    /// The search API rejected the query as invalid or too narrow.
    InvalidQuery,
    /// Any other retrieval failure.
    Retrieval(String),
    /// The analyzer payload did not conform to the declared schema.
    AnalysisParse(String),
    /// The analyzer call itself failed, or returned an empty payload.
    Analysis(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiKey => write!(
                f,
                "An API key is required to proceed. Save one with `commit-scout set-key` \
                 or set GEMINI_API_KEY."
            ),
            Self::BlankQuery => write!(f, "Please enter a search query."),
            Self::BlankCorpus => {
                write!(f, "Please provide a git log file, or use the built-in sample.")
            }
            Self::RateLimited => write!(
                f,
                "GitHub API rate limit exceeded. Please wait a moment or use a local log file."
            ),
            Self::InvalidQuery => write!(f, "Validation failed. Try different keywords."),
            Self::Retrieval(detail) => write!(f, "GitHub API error: {detail}"),
            Self::AnalysisParse(detail) => {
                write!(f, "The model response did not match the expected format: {detail}")
            }
            Self::Analysis(detail) => write!(f, "Commit analysis failed: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<RetrievalError> for SearchError {
    fn from(err: RetrievalError) -> Self {
        match err {
            RetrievalError::RateLimited => Self::RateLimited,
            RetrievalError::InvalidQuery => Self::InvalidQuery,
            RetrievalError::Failed(detail) => Self::Retrieval(detail),
        }
    }
}

/// Orchestrates one pipeline run at a time over the service context.
///
/// The state and the derived keyword/truncation slots are written only here,
/// at transition points; presentation reads them after `run` returns.
pub struct Pipeline<'a> {
    ctx: &'a ServiceContext,
    api_key: String,
    state: PipelineState,
    keywords: Option<String>,
    corpus_truncated: bool,
    observer: Option<Box<dyn Fn(&PipelineState) + 'a>>,
}

impl<'a> Pipeline<'a> {
    /// Creates an idle pipeline with the resolved API key.
    ///
    /// An empty `api_key` is allowed here; the run itself fails with a
    /// configuration error before any network call.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, api_key: String) -> Self {
        Self {
            ctx,
            api_key,
            state: PipelineState::Idle,
            keywords: None,
            corpus_truncated: false,
            observer: None,
        }
    }

    /// Registers a callback invoked on every state transition.
    #[must_use]
    pub fn with_observer(mut self, observer: impl Fn(&PipelineState) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// The keyword string used by the last remote run, for display.
    #[must_use]
    pub fn keywords(&self) -> Option<&str> {
        self.keywords.as_deref()
    }

    /// Whether the last run's corpus was cut to the analysis budget.
    #[must_use]
    pub fn corpus_truncated(&self) -> bool {
        self.corpus_truncated
    }

    /// Runs one search to completion, ending in `Results` or `Error`.
    pub async fn run(&mut self, request: &SearchRequest) -> &PipelineState {
        // Admission control: exactly one run in flight.
        if matches!(self.state, PipelineState::FetchingRemote | PipelineState::Analyzing) {
            return &self.state;
        }

        // Derived state is cleared at run start, not at error time.
        self.keywords = None;
        self.corpus_truncated = false;

        match self.execute(request).await {
            Ok(state) => self.set_state(state),
            Err(err) => self.set_state(PipelineState::Error(err.to_string())),
        }
        &self.state
    }

    async fn execute(&mut self, request: &SearchRequest) -> Result<PipelineState, SearchError> {
        if request.query.trim().is_empty() {
            return Err(SearchError::BlankQuery);
        }
        if let CorpusSource::Local { log } = &request.source {
            if log.trim().is_empty() {
                return Err(SearchError::BlankCorpus);
            }
        }
        if self.api_key.trim().is_empty() {
            return Err(SearchError::MissingApiKey);
        }

        let corpus_text = match &request.source {
            CorpusSource::Remote { repo } => {
                self.set_state(PipelineState::FetchingRemote);
                let keywords =
                    extract::extract_keywords(self.ctx.llm.as_ref(), &request.query, &self.api_key)
                        .await;
                self.keywords = Some(keywords.clone());

                let records = self.ctx.commits.search(repo, &keywords).await?;
                if records.is_empty() {
                    return Ok(PipelineState::Results(Vec::new()));
                }
                corpus::format_corpus(&records)
            }
            CorpusSource::Local { log } => log.clone(),
        };

        self.set_state(PipelineState::Analyzing);
        let (bounded, truncated) = corpus::truncate(&corpus_text);
        self.corpus_truncated = truncated;

        let analyses =
            analyze::analyze(self.ctx.llm.as_ref(), &request.query, bounded, &self.api_key).await?;
        Ok(PipelineState::Results(analyses))
    }

    fn set_state(&mut self, state: PipelineState) {
        if let Some(observer) = &self.observer {
            observer(&state);
        }
        self.state = state;
    }
}
