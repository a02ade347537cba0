use crate::ledger::{NewSavingsProfile, SavingsProfile};
use crate::storage::JsonStore;

use super::ServiceResult;

pub struct SavingsService;

impl SavingsService {
    pub fn list(store: &JsonStore) -> ServiceResult<Vec<SavingsProfile>> {
        let mut profiles = store.database()?.savings_profiles.clone();
        profiles.extend(store.all::<SavingsProfile>()?);
        Ok(profiles)
    }

    pub fn get(store: &JsonStore, id: &str) -> ServiceResult<Option<SavingsProfile>> {
        if let Some(profile) = store
            .database()?
            .savings_profiles
            .iter()
            .find(|profile| profile.id == id)
        {
            return Ok(Some(profile.clone()));
        }
        Ok(store.get::<SavingsProfile>(id)?)
    }

    /// Opens a goal with nothing saved yet, starting now.
    pub fn create(store: &JsonStore, draft: NewSavingsProfile) -> ServiceResult<SavingsProfile> {
        Ok(store.create::<SavingsProfile>(draft)?)
    }
}
