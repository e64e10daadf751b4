use std::sync::Arc;

use legalguard_core::CaseSubmission;
use legalguard_core::constants::EMPTY_DESCRIPTION_MESSAGE;
use legalguard_llm::LegalAdvisor;

use crate::error::ServiceError;
use crate::history::{CreatedReport, HistorySynchronizer};

/// Runs a case through the advisor and records the resulting report.
pub struct CaseService {
    advisor: Arc<dyn LegalAdvisor>,
    history: Arc<HistorySynchronizer>,
}

impl CaseService {
    #[must_use]
    pub fn new(advisor: Arc<dyn LegalAdvisor>, history: Arc<HistorySynchronizer>) -> Self {
        Self { advisor, history }
    }

    pub async fn analyze(&self, submission: CaseSubmission) -> Result<CreatedReport, ServiceError> {
        if !submission.has_description() {
            return Err(ServiceError::InvalidInput(EMPTY_DESCRIPTION_MESSAGE.to_owned()));
        }

        let analysis = self.advisor.analyze_case(&submission).await?;
        self.history.create_report(submission, analysis).await
    }
}
