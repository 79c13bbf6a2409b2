//! Memory capture & search surface.
//!
//! Owns the local view state of the second brain page: the loaded list, the
//! draft being typed, the search box and the category filter. Store access
//! goes through [`MemoryApi`] so the surface can be driven without a server.
//!
//! Local state rules:
//! - the list is loaded once per surface, with no retry;
//! - a successful save is prepended locally, the list is not fetched again;
//! - "clear all" only empties the local list.

use crate::client::{ClientError, SecondBrainClient};
use async_trait::async_trait;
use second_brain_types::{
    Category, CategoryFilter, DEFAULT_TITLE, Memory, MemoryDraft, filter_memories, parse_tags,
};

pub const CLEAR_ALL_PROMPT: &str = "Clear ALL memories loaded from Supabase?";

#[async_trait]
pub trait MemoryApi: Send + Sync {
    async fn list_recent(&self) -> Result<Vec<Memory>, ClientError>;
    async fn insert(&self, draft: MemoryDraft) -> Result<Memory, ClientError>;
}

#[async_trait]
impl MemoryApi for SecondBrainClient {
    async fn list_recent(&self) -> Result<Vec<Memory>, ClientError> {
        self.list_memories().await
    }

    async fn insert(&self, draft: MemoryDraft) -> Result<Memory, ClientError> {
        self.create_memory(&draft).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Form fields for the memory being captured.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub title: String,
    pub category: Category,
    pub tags: String,
    pub content: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: Category::YouTube,
            tags: String::new(),
            content: String::new(),
        }
    }
}

impl Draft {
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }

    fn to_request(&self) -> MemoryDraft {
        let title = match self.title.trim() {
            "" => DEFAULT_TITLE,
            t => t,
        };
        MemoryDraft::new(
            title,
            self.category,
            parse_tags(&self.tags),
            self.content.trim(),
        )
    }

    /// Clears the text fields; the category is kept for the next capture.
    fn reset(&mut self) {
        self.title.clear();
        self.tags.clear();
        self.content.clear();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Saved(Memory),
    /// Blank draft, or a save already in flight.
    Skipped,
    Failed,
}

pub struct SecondBrainSurface<A> {
    api: A,
    memories: Vec<Memory>,
    status: LoadStatus,
    saving: bool,
    pub draft: Draft,
    pub search: String,
    pub filter: CategoryFilter,
}

impl<A: MemoryApi> SecondBrainSurface<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            memories: Vec::new(),
            status: LoadStatus::Idle,
            saving: false,
            draft: Draft::default(),
            search: String::new(),
            filter: CategoryFilter::All,
        }
    }

    pub fn memories(&self) -> &[Memory] {
        &self.memories
    }

    pub fn memory_count(&self) -> usize {
        self.memories.len()
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    // ---------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------

    /// Marks the list as loading. Returns false once a load has been started,
    /// so the list request is only ever issued once.
    pub fn begin_load(&mut self) -> bool {
        if self.status != LoadStatus::Idle {
            return false;
        }
        self.status = LoadStatus::Loading;
        true
    }

    pub fn finish_load(&mut self, result: Result<Vec<Memory>, ClientError>) {
        if self.status != LoadStatus::Loading {
            return;
        }
        match result {
            Ok(memories) => {
                log::debug!("Loaded {} memories", memories.len());
                self.memories = memories;
                self.status = LoadStatus::Ready;
            }
            Err(e) => {
                log::error!("Failed to load memories: {}", e);
                self.memories.clear();
                self.status = LoadStatus::Failed;
            }
        }
    }

    pub async fn activate(&mut self) {
        if !self.begin_load() {
            return;
        }
        let result = self.api.list_recent().await;
        self.finish_load(result);
    }

    // ---------------------------------------------------------------
    // Search
    // ---------------------------------------------------------------

    /// Memories matching the current filter and search, newest first.
    pub fn visible(&self) -> Vec<&Memory> {
        filter_memories(&self.memories, &self.search, self.filter)
    }

    // ---------------------------------------------------------------
    // Capture
    // ---------------------------------------------------------------

    pub fn can_submit(&self) -> bool {
        !self.saving && !self.draft.is_blank()
    }

    /// Builds the insert request and marks the surface as saving. Returns
    /// `None` for a blank draft or while another save is pending.
    pub fn begin_submit(&mut self) -> Option<MemoryDraft> {
        if !self.can_submit() {
            return None;
        }
        self.saving = true;
        Some(self.draft.to_request())
    }

    pub fn finish_submit(&mut self, result: Result<Memory, ClientError>) -> SubmitOutcome {
        if !self.saving {
            return SubmitOutcome::Skipped;
        }
        self.saving = false;
        match result {
            Ok(memory) => {
                self.memories.insert(0, memory.clone());
                self.draft.reset();
                SubmitOutcome::Saved(memory)
            }
            Err(e) => {
                log::error!("Failed to save memory: {}", e);
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let Some(request) = self.begin_submit() else {
            return SubmitOutcome::Skipped;
        };
        let result = self.api.insert(request).await;
        self.finish_submit(result)
    }

    /// Empties the local list after `confirm` agrees. Nothing is deleted from
    /// the store; a reload brings every memory back.
    pub fn clear_all(&mut self, confirm: impl FnOnce(&str) -> bool) -> bool {
        if !confirm(CLEAR_ALL_PROMPT) {
            return false;
        }
        self.memories.clear();
        true
    }
}
