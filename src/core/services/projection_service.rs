use crate::{
    config::ProjectionSettings,
    core::projection::{ProjectionEngine, ProjectionReport, ProjectionWindow},
    ledger::TransactionFilter,
    storage::JsonStore,
};

use super::ServiceResult;

/// Runs projections against the accounts in a [`JsonStore`].
pub struct ProjectionService;

impl ProjectionService {
    pub fn outstanding(
        store: &JsonStore,
        settings: &ProjectionSettings,
        account_id: &str,
        window: ProjectionWindow,
        filter: Option<&TransactionFilter>,
    ) -> ServiceResult<ProjectionReport> {
        let database = store.database()?;
        let report = ProjectionEngine::new(database)
            .with_settings(settings.clone())
            .project_outstanding(account_id, window, filter)?;
        Ok(report)
    }
}
