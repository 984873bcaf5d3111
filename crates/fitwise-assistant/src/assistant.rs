// SPDX-FileCopyrightText: 2026 Fitwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The assistant facade for one user session.
//!
//! Starting a session rebuilds the corpus from the record store, persists
//! it, and re-indexes it. Questions are answered from semantic retrieval
//! when the session is ready and from the raw record tools when it is
//! degraded. An attached generator may rewrite the answer; without one the
//! retrieved text is returned verbatim.

use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};
use chrono::NaiveDate;
use fitwise_config::FitwiseConfig;
use fitwise_core::{FitwiseError, GenerationRequest, RecordSource, ResponseGenerator, UserId};
use fitwise_knowledge::{
    CorpusBuilder, CorpusDocument, CorpusFile, EmbeddingIndex, EmbeddingModel, RetrievalStatus,
    Retriever,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::registry::ToolRegistry;
use crate::state::{AssistantState, DegradedReason};
use crate::tools::{AssistantTool, ToolContext};

/// Text returned when not even the raw record tools can answer.
pub const UNAVAILABLE_MESSAGE: &str =
    "The assistant is unavailable right now. Please try again later.";

/// Session settings, usually derived from [`FitwiseConfig`].
#[derive(Debug, Clone)]
pub struct AssistantOptions {
    pub default_top_k: usize,
    pub activity_window_days: u32,
    pub generation_enabled: bool,
    pub api_key_configured: bool,
    /// Where the corpus file lives. No file is written when `None`.
    pub data_dir: Option<PathBuf>,
    /// Static facts indexed after the user's passages.
    pub facts: Vec<String>,
    /// Fixed date for the activity window; the local date when `None`.
    pub today: Option<NaiveDate>,
}

impl Default for AssistantOptions {
    fn default() -> Self {
        Self {
            default_top_k: 3,
            activity_window_days: 7,
            generation_enabled: false,
            api_key_configured: false,
            data_dir: None,
            facts: Vec::new(),
            today: None,
        }
    }
}

impl AssistantOptions {
    pub fn from_config(config: &FitwiseConfig) -> Self {
        Self {
            default_top_k: config.knowledge.default_top_k,
            activity_window_days: config.assistant.activity_window_days,
            generation_enabled: config.assistant.generation_enabled,
            api_key_configured: config
                .assistant
                .api_key
                .as_deref()
                .is_some_and(|k| !k.trim().is_empty()),
            data_dir: Some(PathBuf::from(&config.storage.data_dir)),
            facts: Vec::new(),
            today: None,
        }
    }

    pub fn with_facts(mut self, facts: Vec<String>) -> Self {
        self.facts = facts;
        self
    }
}

/// Answer to a question or reminder request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub text: String,
    /// True when the answer came from semantic retrieval.
    pub ready: bool,
    /// Set when the session is degraded or retrieval failed.
    pub error: Option<DegradedReason>,
    /// True when a generator produced `text`.
    pub generated: bool,
}

pub struct Assistant {
    user: UserId,
    records: Arc<dyn RecordSource>,
    builder: CorpusBuilder,
    corpus_file: Option<CorpusFile>,
    facts: Vec<String>,
    default_top_k: usize,
    generation_enabled: bool,
    api_key_configured: bool,
    retriever: Retriever,
    registry: ToolRegistry,
    generator: Option<Arc<dyn ResponseGenerator>>,
    state: ArcSwap<AssistantState>,
    corpus: ArcSwapOption<CorpusDocument>,
    /// Held for the whole of a session start.
    session: Mutex<()>,
}

impl Assistant {
    pub fn new(
        user: UserId,
        records: Arc<dyn RecordSource>,
        model: Arc<EmbeddingModel>,
        options: AssistantOptions,
    ) -> Self {
        let retriever = Retriever::new(Arc::new(EmbeddingIndex::new(model)));
        let context = Arc::new(ToolContext {
            user,
            records: Arc::clone(&records),
            retriever: retriever.clone(),
            default_top_k: options.default_top_k,
            activity_window_days: options.activity_window_days,
            today: options.today,
        });
        Self {
            user,
            records,
            builder: CorpusBuilder::new(),
            corpus_file: options
                .data_dir
                .as_ref()
                .map(|dir| CorpusFile::for_user(dir, user)),
            facts: options.facts,
            default_top_k: options.default_top_k,
            generation_enabled: options.generation_enabled,
            api_key_configured: options.api_key_configured,
            retriever,
            registry: ToolRegistry::with_all_tools(context),
            generator: None,
            state: ArcSwap::from_pointee(AssistantState::Uninitialized),
            corpus: ArcSwapOption::empty(),
            session: Mutex::new(()),
        }
    }

    /// Attaches the external generation step.
    pub fn with_generator(mut self, generator: Arc<dyn ResponseGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    pub fn state(&self) -> AssistantState {
        AssistantState::clone(&self.state.load())
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// The corpus built by the latest session start, without static facts.
    pub fn corpus(&self) -> Option<Arc<CorpusDocument>> {
        self.corpus.load_full()
    }

    pub fn corpus_file(&self) -> Option<&CorpusFile> {
        self.corpus_file.as_ref()
    }

    fn set_state(&self, next: AssistantState) {
        let current = self.state.load_full();
        if !current.can_transition_to(&next) {
            warn!(from = %current, to = %next, "unexpected assistant state change");
        }
        debug!(user_id = self.user.0, state = %next, "assistant state");
        self.state.store(Arc::new(next));
    }

    fn degrade(&self, reason: DegradedReason) -> AssistantState {
        warn!(user_id = self.user.0, reason = %reason, "assistant degraded");
        let state = AssistantState::Degraded(reason);
        self.set_state(state.clone());
        state
    }

    /// Rebuilds the corpus and index for a new session.
    ///
    /// Never fails: problems leave the session `Degraded`, which still
    /// answers from the raw record tools. Concurrent calls run one after
    /// the other. Until the new index is swapped in, questions keep being
    /// answered from the previous one.
    pub async fn start_session(&self) -> AssistantState {
        let _guard = self.session.lock().await;
        self.run_session().await
    }

    /// Starts a session unless one has already been started, waiting for
    /// one in flight.
    async fn ensure_session(&self) {
        let _guard = self.session.lock().await;
        if matches!(self.state(), AssistantState::Uninitialized) {
            self.run_session().await;
        }
    }

    async fn run_session(&self) -> AssistantState {
        if self.generation_enabled && !self.api_key_configured {
            let err = FitwiseError::Config("generation is enabled but no api_key is set".into());
            self.retriever.index().clear();
            return self.degrade(DegradedReason::Configuration(err.to_string()));
        }
        if self.generation_enabled && self.generator.is_none() {
            info!("no generation backend attached, answers are returned verbatim");
        }

        self.set_state(AssistantState::BuildingCorpus);
        let records = match self.records.record_set(self.user).await {
            Ok(records) => records,
            Err(e) => {
                self.retriever.index().clear();
                return self.degrade(DegradedReason::Storage(e.to_string()));
            }
        };
        let doc = self.builder.build(&records);
        if let Some(file) = &self.corpus_file {
            file.persist(&doc).await;
        }
        let indexed = doc.clone().with_facts(&self.facts);
        self.corpus.store(Some(Arc::new(doc)));

        self.set_state(AssistantState::Indexing);
        match self.retriever.index().rebuild(&indexed).await {
            Ok(handle) => {
                info!(user_id = self.user.0, passages = handle.len(), "assistant ready");
                self.set_state(AssistantState::Ready);
                AssistantState::Ready
            }
            Err(FitwiseError::ModelUnavailable(message)) => {
                self.degrade(DegradedReason::ModelUnavailable(message))
            }
            Err(e) => self.degrade(DegradedReason::ModelUnavailable(e.to_string())),
        }
    }

    /// Answers `question` using the configured number of passages.
    pub async fn ask(&self, question: &str) -> AssistantReply {
        self.ask_with_top_k(question, self.default_top_k).await
    }

    pub async fn ask_with_top_k(&self, question: &str, top_k: usize) -> AssistantReply {
        // Without a published index, wait for the first session to finish.
        let state = self.state();
        if !self.retriever.index().is_ready() && !matches!(state, AssistantState::Degraded(_)) {
            self.ensure_session().await;
        }

        match self.state() {
            AssistantState::Degraded(reason) => {
                let text = self.raw_record_answer().await;
                let allow_generation = !matches!(reason, DegradedReason::Configuration(_));
                if allow_generation {
                    self.respond(question, text, false, Some(reason)).await
                } else {
                    verbatim(text, false, Some(reason))
                }
            }
            // Ready, or mid-rebuild with the previous index still published.
            _ if self.retriever.index().is_ready() => {
                let result = self.retriever.query(question, top_k).await;
                let error = match &result.status {
                    RetrievalStatus::Unavailable(message) => {
                        Some(DegradedReason::ModelUnavailable(message.clone()))
                    }
                    _ => None,
                };
                let ready = error.is_none() && result.status != RetrievalStatus::NotReady;
                self.respond(question, result.to_text(), ready, error).await
            }
            // A concurrent restart cleared the index.
            _ => verbatim(self.raw_record_answer().await, false, None),
        }
    }

    /// Reminder text from the activity checker.
    pub async fn reminder(&self) -> AssistantReply {
        let state = self.state();
        let text = self
            .registry
            .invoke(AssistantTool::ActivityChecker.name(), "")
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "activity check failed");
                UNAVAILABLE_MESSAGE.to_string()
            });
        verbatim(text, state.is_ready(), state.degraded_reason().cloned())
    }

    /// Workout and food listings, used when retrieval is unavailable.
    async fn raw_record_answer(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        for tool in [AssistantTool::WorkoutData, AssistantTool::NutritionData] {
            match self.registry.invoke(tool.name(), "").await {
                Ok(text) => parts.push(text),
                Err(e) => warn!(tool = tool.name(), error = %e, "record tool failed"),
            }
        }
        if parts.is_empty() {
            UNAVAILABLE_MESSAGE.to_string()
        } else {
            parts.join("\n")
        }
    }

    async fn respond(
        &self,
        question: &str,
        context: String,
        ready: bool,
        error: Option<DegradedReason>,
    ) -> AssistantReply {
        let Some(generator) = self.generator.as_ref().filter(|_| self.generation_enabled) else {
            return verbatim(context, ready, error);
        };
        let request = GenerationRequest {
            question: question.to_string(),
            context: context.clone(),
            tools: self.registry.tool_specs(),
        };
        match generator.generate(request).await {
            Ok(text) => AssistantReply {
                text,
                ready,
                error,
                generated: true,
            },
            Err(e) => {
                warn!(error = %e, "generation failed, returning retrieved text");
                verbatim(context, ready, error)
            }
        }
    }
}

fn verbatim(text: String, ready: bool, error: Option<DegradedReason>) -> AssistantReply {
    AssistantReply {
        text,
        ready,
        error,
        generated: false,
    }
}
