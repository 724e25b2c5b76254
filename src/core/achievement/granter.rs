use super::store::AchievementStore;
use crate::errors::AppError;
use crate::models::item::OwnedItem;
use chrono::NaiveDateTime;

/// Result of a grant batch. On failure `granted` still lists the grants
/// persisted before the error.
#[derive(Debug, Default)]
pub struct GrantOutcome {
    pub granted: Vec<OwnedItem>,
    /// Ids that another writer granted first.
    pub already_owned: Vec<u64>,
    pub error: Option<AppError>,
}

impl GrantOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Persist one achievement grant per item id.
///
/// Stops at the first persistence error; later ids are not attempted.
pub fn grant<S: AchievementStore + ?Sized>(
    store: &S,
    user_id: u64,
    item_ids: &[u64],
    now: NaiveDateTime,
) -> GrantOutcome {
    let mut outcome = GrantOutcome::default();

    if item_ids.is_empty() {
        return outcome;
    }
    if user_id == 0 {
        outcome.error = Some(AppError::MissingUser);
        return outcome;
    }

    for &item_id in item_ids {
        let owned = OwnedItem::achievement(user_id, item_id, now);

        match store.insert_owned_item_if_absent(&owned) {
            Ok(true) => outcome.granted.push(owned),
            Ok(false) => outcome.already_owned.push(item_id),
            Err(e) => {
                outcome.error = Some(AppError::Grant {
                    item_id,
                    source: Box::new(e),
                });
                break;
            }
        }
    }

    outcome
}
