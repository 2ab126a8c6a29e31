//! 接続ごとのセッション状態機械: `Joining → Active → Left`
//!
//! `Left` への遷移は一度だけ成功します。受信タスクが処理中のアクションを抱えたまま
//! 切断されても、後片付け（登録解除・redo スタック破棄・退出通知）は一度しか走りません。

use std::sync::atomic::{AtomicU8, Ordering};

use super::{Participant, RoomKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SessionPhase {
    Joining = 0,
    Active = 1,
    Left = 2,
}

impl SessionPhase {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => SessionPhase::Joining,
            1 => SessionPhase::Active,
            _ => SessionPhase::Left,
        }
    }
}

#[derive(Debug)]
pub struct Session {
    room: RoomKey,
    participant: Participant,
    phase: AtomicU8,
}

impl Session {
    pub fn new(room: RoomKey, participant: Participant) -> Self {
        Self {
            room,
            participant,
            phase: AtomicU8::new(SessionPhase::Joining as u8),
        }
    }

    pub fn room(&self) -> &RoomKey {
        &self.room
    }

    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    pub fn phase(&self) -> SessionPhase {
        SessionPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub fn is_active(&self) -> bool {
        self.phase() == SessionPhase::Active
    }

    /// `Joining → Active`. Returns `false` if the session is not joining.
    pub fn activate(&self) -> bool {
        self.phase
            .compare_exchange(
                SessionPhase::Joining as u8,
                SessionPhase::Active as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Enter `Left`. Returns `true` only for the call that performed the transition.
    pub fn mark_left(&self) -> bool {
        self.phase.swap(SessionPhase::Left as u8, Ordering::AcqRel) != SessionPhase::Left as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Color, DisplayName, ParticipantId, Timestamp};

    fn create_test_session() -> Session {
        Session::new(
            RoomKey::new("lobby".to_string()).unwrap(),
            Participant::new(
                ParticipantId::new("alice".to_string()).unwrap(),
                DisplayName::new("Alice".to_string()).unwrap(),
                Color::new("#123456".to_string()).unwrap(),
                Timestamp::new(0),
            ),
        )
    }

    #[test]
    fn test_session_lifecycle() {
        // テスト項目: Joining → Active → Left の順に遷移する
        // given (前提条件):
        let session = create_test_session();
        assert_eq!(session.phase(), SessionPhase::Joining);
        assert!(!session.is_active());

        // when (操作) / then (期待する結果):
        assert!(session.activate());
        assert!(session.is_active());
        assert!(!session.activate());

        assert!(session.mark_left());
        assert_eq!(session.phase(), SessionPhase::Left);
        assert!(!session.is_active());
    }

    #[test]
    fn test_mark_left_succeeds_once() {
        // テスト項目: Left への遷移は一度だけ成功する
        let session = create_test_session();
        session.activate();

        assert!(session.mark_left());
        assert!(!session.mark_left());
        assert!(!session.mark_left());
    }

    #[test]
    fn test_left_session_cannot_be_activated() {
        // テスト項目: Joining 中に切断されたセッションは Active にならない
        let session = create_test_session();

        assert!(session.mark_left());
        assert!(!session.activate());
        assert_eq!(session.phase(), SessionPhase::Left);
    }

    #[test]
    fn test_mark_left_is_exclusive_across_threads() {
        // テスト項目: 複数スレッドから同時に退出処理しても成功するのは 1 回だけ
        let session = std::sync::Arc::new(create_test_session());
        session.activate();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let session = session.clone();
                std::thread::spawn(move || session.mark_left())
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|left| *left)
            .count();

        assert_eq!(successes, 1);
    }
}
