use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_VOTE_RETRIES: usize = 10_000;

/// Rules fixed for the whole lifetime of a [`Town`](super::town::Town).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// 公開投票で過半数が出るまでの最大試行回数
    pub max_vote_retries: usize,
    /// マフィア全滅でもゲームを終了する
    pub town_victory: bool,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            max_vote_retries: DEFAULT_MAX_VOTE_RETRIES,
            town_victory: false,
        }
    }
}
