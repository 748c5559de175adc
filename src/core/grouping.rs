use crate::domain::model::{CoupleGroup, Pool, Roster};
use crate::utils::error::ConstructionError;
use rand::seq::SliceRandom;
use rand::Rng;

/// 將名單分成一或兩個互斥的池，同一對伴侶永遠不會落在同一個池
///
/// 全部都是單身者時只回傳一個池。否則回傳兩個池：單身者隨機放入其中一個，
/// 伴侶的第一位隨機放入一個池、第二位放入另一個池。池的大小可能不相等。
pub fn split<R: Rng + ?Sized>(roster: &Roster, rng: &mut R) -> Vec<Pool> {
    if roster.all_singles() {
        let mut pool = Pool::new(0);
        pool.members = roster.names().map(str::to_string).collect();
        return vec![pool];
    }

    let mut pools = vec![Pool::new(0), Pool::new(1)];
    for group in roster.groups() {
        let side = rng.gen_range(0..2);
        match group {
            CoupleGroup::Single(name) => pools[side].members.push(name.clone()),
            CoupleGroup::Couple(first, second) => {
                pools[side].members.push(first.clone());
                pools[1 - side].members.push(second.clone());
            }
        }
    }

    tracing::debug!(
        "Split {} participants into pools of {} and {}",
        roster.len(),
        pools[0].len(),
        pools[1].len()
    );
    pools
}

/// 把過小的非空池補到 `min_size`：從另一個池隨機移入單身者，
/// 且只在捐出的池仍維持至少 `min_size` 人時才移動。伴侶不會被移動。
pub fn balance<R: Rng + ?Sized>(pools: &mut [Pool], roster: &Roster, min_size: usize, rng: &mut R) {
    if pools.len() != 2 {
        return;
    }

    for short in 0..2 {
        let donor = 1 - short;
        while !pools[short].is_empty()
            && pools[short].len() < min_size
            && pools[donor].len() > min_size
        {
            let movable: Vec<usize> = pools[donor]
                .members
                .iter()
                .enumerate()
                .filter(|(_, name)| roster.group_of(name).is_some_and(CoupleGroup::is_single))
                .map(|(position, _)| position)
                .collect();

            let Some(&position) = movable.choose(rng) else {
                break;
            };
            let name = pools[donor].members.swap_remove(position);
            tracing::debug!("Moving {} from pool {} to pool {}", name, donor, short);
            pools[short].members.push(name);
        }
    }
}

/// 每個非空池都必須至少有 `min_size` 人，否則抽籤必定失敗
pub fn ensure_assignable(pools: &[Pool], min_size: usize) -> Result<(), ConstructionError> {
    match pools
        .iter()
        .find(|pool| !pool.is_empty() && pool.len() < min_size)
    {
        Some(pool) => Err(ConstructionError::UnassignablePool {
            pool: pool.index,
            size: pool.len(),
            min_size,
            members: pool.members.clone(),
        }),
        None => Ok(()),
    }
}

/// 名單是否能在 split + balance 之後產生可抽籤的池
///
/// 只有單身者時需要 `min_size` 人；有伴侶時兩個池都至少含每對伴侶中的一人，
/// 所以總人數必須至少是 `2 * min_size`。
pub fn is_assignable(roster: &Roster, min_size: usize) -> bool {
    if roster.all_singles() {
        roster.len() >= min_size
    } else {
        roster.len() >= 2 * min_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roster(groups: Vec<CoupleGroup>) -> Roster {
        Roster::new(groups).unwrap()
    }

    fn pool_of<'a>(pools: &'a [Pool], name: &str) -> &'a Pool {
        pools.iter().find(|pool| pool.contains(name)).unwrap()
    }

    #[test]
    fn test_all_singles_stay_in_one_pool() {
        let roster = roster(vec![
            CoupleGroup::single("Ann"),
            CoupleGroup::single("Bob"),
            CoupleGroup::single("Cid"),
            CoupleGroup::single("Dee"),
        ]);
        let pools = split(&roster, &mut StdRng::seed_from_u64(1));

        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].members, vec!["Ann", "Bob", "Cid", "Dee"]);
    }

    #[test]
    fn test_couples_are_separated() {
        let roster = Roster::example();
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..50 {
            let pools = split(&roster, &mut rng);
            assert_eq!(pools.len(), 2);
            assert_eq!(pools[0].len() + pools[1].len(), 6);
            for group in roster.groups() {
                if let CoupleGroup::Couple(first, second) = group {
                    assert_ne!(pool_of(&pools, first).index, pool_of(&pools, second).index);
                }
            }
        }
    }

    #[test]
    fn test_single_couple_splits_into_two_pools_of_one() {
        let roster = roster(vec![CoupleGroup::couple("Greg", "Megan")]);
        let mut rng = StdRng::seed_from_u64(3);
        let mut pools = split(&roster, &mut rng);
        balance(&mut pools, &roster, 3, &mut rng);

        assert_eq!(pools.iter().map(Pool::len).collect::<Vec<_>>(), vec![1, 1]);
        assert!(matches!(
            ensure_assignable(&pools, 3),
            Err(ConstructionError::UnassignablePool { size: 1, min_size: 3, .. })
        ));
    }

    #[test]
    fn test_balance_fills_short_pool_with_singles() {
        let roster = roster(vec![
            CoupleGroup::couple("Greg", "Megan"),
            CoupleGroup::single("Ann"),
            CoupleGroup::single("Bob"),
            CoupleGroup::single("Cid"),
            CoupleGroup::single("Dee"),
        ]);
        let mut rng = StdRng::seed_from_u64(4);

        // 最差情況：所有單身者都在同一邊
        let mut pools = vec![
            Pool {
                index: 0,
                members: vec!["Greg".into(), "Ann".into(), "Bob".into(), "Cid".into(), "Dee".into()],
            },
            Pool {
                index: 1,
                members: vec!["Megan".into()],
            },
        ];
        balance(&mut pools, &roster, 3, &mut rng);

        assert_eq!(pools[0].len(), 3);
        assert_eq!(pools[1].len(), 3);
        assert!(pools[0].contains("Greg"));
        assert!(pools[1].contains("Megan"));
        assert!(ensure_assignable(&pools, 3).is_ok());
    }

    #[test]
    fn test_balance_never_starves_the_donor() {
        let roster = roster(vec![
            CoupleGroup::couple("Greg", "Megan"),
            CoupleGroup::single("Ann"),
            CoupleGroup::single("Bob"),
        ]);
        let mut pools = vec![
            Pool {
                index: 0,
                members: vec!["Greg".into(), "Ann".into(), "Bob".into()],
            },
            Pool {
                index: 1,
                members: vec!["Megan".into()],
            },
        ];
        balance(&mut pools, &roster, 3, &mut StdRng::seed_from_u64(5));

        assert_eq!(pools[0].len(), 3);
        assert_eq!(pools[1].len(), 1);
    }

    #[test]
    fn test_is_assignable_matches_split_and_balance() {
        let mut rng = StdRng::seed_from_u64(6);
        for couples in 0..5 {
            for singles in 0..7 {
                let mut groups = Vec::new();
                for i in 0..couples {
                    groups.push(CoupleGroup::couple(format!("A{}", i), format!("B{}", i)));
                }
                for i in 0..singles {
                    groups.push(CoupleGroup::single(format!("S{}", i)));
                }
                let Ok(roster) = Roster::new(groups) else {
                    continue;
                };

                for min_size in [2, 3] {
                    for _ in 0..20 {
                        let mut pools = split(&roster, &mut rng);
                        balance(&mut pools, &roster, min_size, &mut rng);
                        assert_eq!(
                            ensure_assignable(&pools, min_size).is_ok(),
                            is_assignable(&roster, min_size),
                            "couples={} singles={} min_size={}",
                            couples,
                            singles,
                            min_size
                        );
                    }
                }
            }
        }
    }
}
