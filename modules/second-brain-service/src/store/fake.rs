//! In-process table used by the service tests.

use super::MemoryTable;
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use second_brain_types::{Category, Memory, NewMemory};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub struct FakeTable {
    rows: Mutex<Vec<Memory>>,
    next_id: AtomicUsize,
    failing: AtomicBool,
    ignore_limit: AtomicBool,
}

impl FakeTable {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicUsize::new(1),
            failing: AtomicBool::new(false),
            ignore_limit: AtomicBool::new(false),
        }
    }

    /// Table holding `count` rows, `mem-1` oldest and `mem-{count}` newest.
    pub fn seeded(count: usize) -> Self {
        let table = Self::new();
        for i in 0..count {
            let row = NewMemory {
                title: format!("Memory {}", i + 1),
                category: Category::Other,
                tags: vec![],
                content: String::new(),
                source: "dashboard".to_string(),
            };
            table.push(&row);
        }
        table
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Makes `select_recent` return every row, like a misbehaving backend.
    pub fn ignore_limit(&self) {
        self.ignore_limit.store(true, Ordering::SeqCst);
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn push(&self, row: &NewMemory) -> Memory {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let memory = Memory {
            id: format!("mem-{}", n),
            title: row.title.clone(),
            category: row.category,
            tags: row.tags.clone(),
            content: row.content.clone(),
            created_at: (base + Duration::minutes(n as i64)).to_rfc3339(),
            source: row.source.clone(),
        };
        self.rows.lock().unwrap().push(memory.clone());
        memory
    }
}

#[async_trait]
impl MemoryTable for FakeTable {
    async fn select_recent(&self, limit: usize) -> Result<Vec<Memory>, String> {
        if self.failing.load(Ordering::SeqCst) {
            return Err("connection refused".to_string());
        }
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if !self.ignore_limit.load(Ordering::SeqCst) {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn insert_row(&self, row: &NewMemory) -> Result<Memory, String> {
        if self.failing.load(Ordering::SeqCst) {
            return Err("connection refused".to_string());
        }
        Ok(self.push(row))
    }

    fn describe(&self) -> String {
        "fake://memories".to_string()
    }
}
