//! Program directory service

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::Program;

/// Program directory service
pub struct ProgramService {
    ctx: Arc<ServiceContext>,
}

impl ProgramService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Programs for the selection list, in backend order
    ///
    /// Any failure is reported as [`CoreError::ProgramsUnavailable`].
    pub async fn list_programs(&self) -> CoreResult<Vec<Program>> {
        match self.ctx.program_directory.list_programs().await {
            Ok(programs) => {
                log::debug!("Loaded {} programs", programs.len());
                Ok(programs)
            }
            Err(e) => {
                log::error!("Failed to load programs: {e}");
                Err(CoreError::ProgramsUnavailable(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockProgramDirectory, create_test_context};
    use hse_enroll_api::ApiError;

    #[tokio::test]
    async fn keeps_backend_order() {
        let programs = vec![
            Program {
                id: 7,
                name: "Software Engineering".into(),
            },
            Program {
                id: 3,
                name: "Applied Mathematics".into(),
            },
        ];
        let ctx = create_test_context(Arc::new(MockProgramDirectory::with_programs(programs)));

        let listed = ProgramService::new(ctx).list_programs().await.unwrap();

        let ids: Vec<_> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![7, 3]);
    }

    #[tokio::test]
    async fn failure_becomes_programs_unavailable() {
        let ctx = create_test_context(Arc::new(MockProgramDirectory::failing(
            ApiError::Server {
                status: 500,
                raw_message: None,
            },
        )));

        let err = ProgramService::new(ctx).list_programs().await.unwrap_err();

        assert!(matches!(err, CoreError::ProgramsUnavailable(_)), "got {err:?}");
        assert!(!err.is_expected());
    }
}
