use crate::domain::model::{Assignment, Roster};
use crate::domain::ports::ArtifactStore;
use crate::utils::error::{Result, ValidationError};
use std::collections::{HashMap, HashSet};

/// 獨立重新檢查儲存中的抽籤結果，遇到第一個錯誤即停止
///
/// 檢查順序：
/// 1. 記錄數等於參與者人數
/// 2. 沒有重複的送禮者記錄
/// 3. 沒有人被抽到兩次以上
/// 4. 每位參與者都有記錄，且每位收禮者都在名單上
/// 5. 沒有人抽到自己或自己的伴侶
pub fn validate<S: ArtifactStore + ?Sized>(roster: &Roster, store: &S) -> Result<()> {
    let mut givers = store.list()?;
    givers.sort();

    check_record_count(roster, &givers)?;
    check_duplicate_records(&givers)?;

    let assignment = read_assignment(store, &givers)?;
    check_recipients_unique(&assignment)?;
    check_totality(roster, &assignment)?;
    check_couples(roster, &assignment)?;

    tracing::debug!("All {} picks passed validation", assignment.len());
    Ok(())
}

fn read_assignment<S: ArtifactStore + ?Sized>(store: &S, givers: &[String]) -> Result<Assignment> {
    let mut assignment = Assignment::new();
    for giver in givers {
        match store.get(giver)? {
            Some(recipient) => {
                assignment.insert(giver.clone(), recipient);
            }
            None => {
                return Err(ValidationError::MissingRecord {
                    name: giver.clone(),
                }
                .into())
            }
        }
    }
    Ok(assignment)
}

fn check_record_count(roster: &Roster, givers: &[String]) -> std::result::Result<(), ValidationError> {
    let participants = roster.len();
    if givers.len() != participants {
        return Err(ValidationError::RecordCountMismatch {
            records: givers.len(),
            participants,
        });
    }
    Ok(())
}

fn check_duplicate_records(givers: &[String]) -> std::result::Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for giver in givers {
        if !seen.insert(giver.as_str()) {
            return Err(ValidationError::DuplicateRecord {
                giver: giver.clone(),
            });
        }
    }
    Ok(())
}

fn check_recipients_unique(assignment: &Assignment) -> std::result::Result<(), ValidationError> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for recipient in assignment.values() {
        *counts.entry(recipient.as_str()).or_default() += 1;
    }

    for recipient in assignment.values() {
        let times = counts[recipient.as_str()];
        if times > 1 {
            return Err(ValidationError::RecipientOverAssigned {
                recipient: recipient.clone(),
                times,
            });
        }
    }
    Ok(())
}

fn check_totality(roster: &Roster, assignment: &Assignment) -> std::result::Result<(), ValidationError> {
    if let Some(name) = roster.names().find(|name| !assignment.contains_key(*name)) {
        return Err(ValidationError::MissingRecord {
            name: name.to_string(),
        });
    }

    for (giver, recipient) in assignment {
        if !roster.contains(recipient) {
            return Err(ValidationError::UnknownRecipient {
                giver: giver.clone(),
                recipient: recipient.clone(),
            });
        }
    }
    Ok(())
}

fn check_couples(roster: &Roster, assignment: &Assignment) -> std::result::Result<(), ValidationError> {
    for group in roster.groups() {
        for member in group.members() {
            let Some(recipient) = assignment.get(member) else {
                continue;
            };

            if recipient == member {
                return Err(ValidationError::SelfAssigned {
                    giver: member.to_string(),
                });
            }
            if group.partner_of(member) == Some(recipient.as_str()) {
                return Err(ValidationError::PartnerAssigned {
                    giver: member.to_string(),
                    recipient: recipient.clone(),
                });
            }
        }
    }
    Ok(())
}
