use crate::utils::error::ConstructionError;
use crate::utils::validation::validate_participant_name;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// 名單中的一個項目：單身參與者，或是不能互抽的一對伴侶
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoupleGroup {
    Single(String),
    Couple(String, String),
}

impl CoupleGroup {
    pub fn single(name: impl Into<String>) -> Self {
        CoupleGroup::Single(name.into())
    }

    pub fn couple(first: impl Into<String>, second: impl Into<String>) -> Self {
        CoupleGroup::Couple(first.into(), second.into())
    }

    pub fn members(&self) -> impl Iterator<Item = &str> {
        let (first, second) = match self {
            CoupleGroup::Single(name) => (name, None),
            CoupleGroup::Couple(first, second) => (first, Some(second)),
        };
        std::iter::once(first.as_str()).chain(second.map(String::as_str))
    }

    pub fn is_single(&self) -> bool {
        matches!(self, CoupleGroup::Single(_))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members().any(|member| member == name)
    }

    /// 取得同組中另一位成員；單身者沒有伴侶
    pub fn partner_of(&self, name: &str) -> Option<&str> {
        match self {
            CoupleGroup::Couple(first, second) if first == name => Some(second),
            CoupleGroup::Couple(first, second) if second == name => Some(first),
            _ => None,
        }
    }
}

/// 一次抽籤的完整名單。建構時即檢查名稱唯一與合法，之後唯讀。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Roster {
    groups: Vec<CoupleGroup>,
}

impl Roster {
    pub fn new(groups: Vec<CoupleGroup>) -> Result<Self, ConstructionError> {
        if groups.is_empty() {
            return Err(ConstructionError::EmptyRoster);
        }

        let mut seen = HashSet::new();
        for name in groups.iter().flat_map(CoupleGroup::members) {
            validate_participant_name(name)?;
            if !seen.insert(name) {
                return Err(ConstructionError::DuplicateName {
                    name: name.to_string(),
                });
            }
        }

        Ok(Self { groups })
    }

    /// 三對伴侶的範例名單
    pub fn example() -> Self {
        Self {
            groups: vec![
                CoupleGroup::couple("Greg", "Megan"),
                CoupleGroup::couple("Russell", "Sondra"),
                CoupleGroup::couple("Josh", "Caitlin"),
            ],
        }
    }

    pub fn groups(&self) -> &[CoupleGroup] {
        &self.groups
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().flat_map(CoupleGroup::members)
    }

    /// 參與者人數 (不是組數)
    pub fn len(&self) -> usize {
        self.names().count()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn all_singles(&self) -> bool {
        self.groups.iter().all(CoupleGroup::is_single)
    }

    pub fn couple_count(&self) -> usize {
        self.groups.iter().filter(|g| !g.is_single()).count()
    }

    pub fn single_count(&self) -> usize {
        self.groups.iter().filter(|g| g.is_single()).count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names().any(|member| member == name)
    }

    pub fn group_of(&self, name: &str) -> Option<&CoupleGroup> {
        self.groups.iter().find(|g| g.contains(name))
    }
}

/// Grouping 產生的工作子集合，只在一次 Assignment Engine 呼叫中使用
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pool {
    pub index: usize,
    pub members: Vec<String>,
}

impl Pool {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            members: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|member| member == name)
    }
}

/// 送禮者 → 收禮者
pub type Assignment = BTreeMap<String, String>;

const NAME_LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const MOCK_NAME_LENGTH: usize = 10;

fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..MOCK_NAME_LENGTH)
        .map(|_| NAME_LETTERS[rng.gen_range(0..NAME_LETTERS.len())] as char)
        .collect()
}

fn unique_name<R: Rng + ?Sized>(rng: &mut R, taken: &mut HashSet<String>) -> String {
    loop {
        let name = random_name(rng);
        if taken.insert(name.clone()) {
            return name;
        }
    }
}

/// 壓力測試用的隨機名單：2..=99 個項目，每項隨機為單身或伴侶，名稱為 10 個隨機字母
pub fn mock_roster<R: Rng + ?Sized>(rng: &mut R) -> Vec<CoupleGroup> {
    let entries = rng.gen_range(2..100);
    let mut taken = HashSet::new();

    (0..entries)
        .map(|_| {
            if rng.gen_bool(0.5) {
                CoupleGroup::Single(unique_name(rng, &mut taken))
            } else {
                let first = unique_name(rng, &mut taken);
                let second = unique_name(rng, &mut taken);
                CoupleGroup::Couple(first, second)
            }
        })
        .collect()
}
