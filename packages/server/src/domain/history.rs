//! History Buffer
//!
//! 直近のチャットイベントを挿入順に保持する固定長バッファです。
//! 容量を超えた分は古いものから捨てます。

use std::collections::VecDeque;

use super::entity::ChatEvent;

/// 既定の履歴件数
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    events: VecDeque<ChatEvent>,
    capacity: usize,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            // 上限は設定値のまま、事前確保だけ既定値までに抑える
            events: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
        }
    }

    /// 末尾に追加し、容量を超えた分を先頭から捨てる
    pub fn append(&mut self, event: ChatEvent) {
        self.events.push_back(event);
        while self.events.len() > self.capacity {
            self.events.pop_front();
        }
    }

    /// 古い順のスナップショット
    pub fn snapshot(&self) -> Vec<ChatEvent> {
        self.events.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}
