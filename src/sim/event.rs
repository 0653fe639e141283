//! Notable things that happened during a frame

use glam::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    CombatStarted,
    CombatEnded { score: u64 },
    WarpEngaged,
    WarpDisengaged { relocated: usize },
    EnemyDestroyed { pos: Vec2, score: u64 },
    MeteorTriggered,
}
