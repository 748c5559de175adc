use crate::domain::model::{Assignment, Pool};
use crate::domain::ports::ArtifactStore;
use crate::utils::error::{ConstructionError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentRules {
    /// 是否允許 A→B 與 B→A 同時成立
    pub allow_reciprocal: bool,
}

impl AssignmentRules {
    pub fn new(allow_reciprocal: bool) -> Self {
        Self { allow_reciprocal }
    }

    /// 最短的合法循環長度，也就是一個非空池最少需要的人數
    pub fn min_pool_size(&self) -> usize {
        if self.allow_reciprocal {
            2
        } else {
            3
        }
    }
}

/// 單一池內已被抽走的收禮者：收禮者 → 送禮者
///
/// 已記錄的配對會形成若干條鏈 (x1 → x2 → ... → g)，其中 g 尚未送出。
/// 沿著這個對應往回走就能找到 g 所在鏈的起點。
#[derive(Debug, Default)]
pub struct ClaimedRecipients {
    giver_by_recipient: HashMap<String, String>,
}

impl ClaimedRecipients {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_claimed(&self, recipient: &str) -> bool {
        self.giver_by_recipient.contains_key(recipient)
    }

    /// 誰抽到了 `recipient`
    pub fn giver_of(&self, recipient: &str) -> Option<&str> {
        self.giver_by_recipient.get(recipient).map(String::as_str)
    }

    pub fn record(&mut self, giver: &str, recipient: &str) {
        self.giver_by_recipient
            .insert(recipient.to_string(), giver.to_string());
    }

    /// `giver` 所在鏈的起點與鏈長。`giver` 必須尚未送出，否則會無限循環。
    pub fn chain_head<'a>(&'a self, giver: &'a str) -> (&'a str, usize) {
        let mut head = giver;
        let mut length = 1;
        while let Some(previous) = self.giver_of(head) {
            head = previous;
            length += 1;
        }
        (head, length)
    }
}

/// 一個池的抽籤狀態，只存在於一次 `assign` 呼叫中
struct PoolDraw<'a> {
    pool: &'a Pool,
    rules: AssignmentRules,
    claimed: ClaimedRecipients,
    /// 尚未落入已封閉循環的人數
    open: usize,
}

impl<'a> PoolDraw<'a> {
    fn new(pool: &'a Pool, rules: AssignmentRules) -> Self {
        Self {
            pool,
            rules,
            claimed: ClaimedRecipients::new(),
            open: pool.len(),
        }
    }

    fn eligible(&self, giver: &str) -> Vec<&'a str> {
        let reciprocal = if self.rules.allow_reciprocal {
            None
        } else {
            self.claimed.giver_of(giver)
        };

        // 抽到自己鏈的起點會封閉成循環；剩下的人不足一個循環時不可封閉
        let (head, length) = self.claimed.chain_head(giver);
        let remaining = self.open - length;
        let strands = remaining > 0 && remaining < self.rules.min_pool_size();

        let pool: &'a Pool = self.pool;
        pool.members
            .iter()
            .map(String::as_str)
            .filter(|candidate| *candidate != giver)
            .filter(|candidate| !self.claimed.is_claimed(candidate))
            .filter(|candidate| Some(*candidate) != reciprocal)
            .filter(|candidate| !(strands && *candidate == head))
            .collect()
    }

    fn record(&mut self, giver: &str, recipient: &str) {
        let (head, length) = self.claimed.chain_head(giver);
        if head == recipient {
            self.open -= length;
        }
        self.claimed.record(giver, recipient);
    }
}

/// 為一個池抽籤，每抽出一位就立即寫入 `store`
///
/// 送禮者以隨機順序處理；每位送禮者從合格名單中均勻抽出一位收禮者。
/// 合格名單為池內成員扣除自己、已被抽走的人，以及 (不允許互抽時) 已抽到自己的人。
/// 合格名單為空時回傳 `ConstructionError::PoolExhausted`。
pub fn assign<S, R>(
    pool: &Pool,
    rules: AssignmentRules,
    store: &mut S,
    rng: &mut R,
) -> Result<Assignment>
where
    S: ArtifactStore + ?Sized,
    R: Rng + ?Sized,
{
    tracing::info!("🎁 Assigning pool {} ({} members)", pool.index, pool.len());

    let mut givers: Vec<&str> = pool.members.iter().map(String::as_str).collect();
    givers.shuffle(rng);

    let mut draw = PoolDraw::new(pool, rules);
    let mut assignment = Assignment::new();

    for giver in givers {
        let eligible = draw.eligible(giver);
        tracing::debug!("{} draws from {} eligible recipients", giver, eligible.len());

        let recipient = *eligible
            .choose(rng)
            .ok_or_else(|| ConstructionError::PoolExhausted {
                pool: pool.index,
                giver: giver.to_string(),
            })?;
        tracing::trace!("{} -> {}", giver, recipient);

        store.put(giver, recipient)?;
        draw.record(giver, recipient);
        assignment.insert(giver.to_string(), recipient.to_string());
    }

    Ok(assignment)
}
