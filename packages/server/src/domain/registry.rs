//! Session Registry
//!
//! 「今ロビーにいるのは誰か」を表す唯一の情報源です。
//! 接続 ID ごとに参加者レコードを 1 件だけ保持し、挿入順を保ちます。

use super::{
    entity::Participant,
    error::RegistryError,
    value_object::{ConnectionId, DisplayName, Timestamp},
};

/// 接続 ID → 参加者レコードの対応表
///
/// 参加者数は小さいため `Vec` を線形探索します。
/// 同じ接続 ID の再登録は元の位置で上書きされるので、順序は最初の登録順になります。
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    participants: Vec<Participant>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 参加者を登録（既存の接続 ID なら上書き）
    ///
    /// 名前が未指定・空白のみなら "Anonymous"。参加時刻は常に `joined_at` に更新されます。
    pub fn register(
        &mut self,
        connection_id: ConnectionId,
        requested_name: Option<&str>,
        joined_at: Timestamp,
    ) -> Participant {
        let participant = Participant::new(
            connection_id,
            DisplayName::or_anonymous(requested_name),
            joined_at,
        );

        match self.position(&participant.connection_id) {
            Some(index) => self.participants[index] = participant.clone(),
            None => self.participants.push(participant.clone()),
        }

        participant
    }

    /// 表示名を変更（参加時刻は保持）
    pub fn rename(
        &mut self,
        connection_id: &ConnectionId,
        new_name: DisplayName,
    ) -> Result<Participant, RegistryError> {
        let index = self
            .position(connection_id)
            .ok_or_else(|| RegistryError::ParticipantNotFound(connection_id.to_string()))?;

        let participant = &mut self.participants[index];
        participant.display_name = new_name;
        Ok(participant.clone())
    }

    /// 参加者を削除して返す
    ///
    /// 存在しない場合は `ParticipantNotFound`（切断と回収の競合でも panic しない）。
    pub fn remove(&mut self, connection_id: &ConnectionId) -> Result<Participant, RegistryError> {
        let index = self
            .position(connection_id)
            .ok_or_else(|| RegistryError::ParticipantNotFound(connection_id.to_string()))?;

        Ok(self.participants.remove(index))
    }

    pub fn get(&self, connection_id: &ConnectionId) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| &p.connection_id == connection_id)
    }

    /// 全参加者のスナップショット（挿入順）
    pub fn snapshot(&self) -> Vec<Participant> {
        self.participants.clone()
    }

    pub fn count(&self) -> usize {
        self.participants.len()
    }

    /// `cutoff` より前に参加した接続 ID の一覧（挿入順）
    pub fn joined_before(&self, cutoff: Timestamp) -> Vec<ConnectionId> {
        self.participants
            .iter()
            .filter(|p| p.joined_at < cutoff)
            .map(|p| p.connection_id.clone())
            .collect()
    }

    fn position(&self, connection_id: &ConnectionId) -> Option<usize> {
        self.participants
            .iter()
            .position(|p| &p.connection_id == connection_id)
    }
}
