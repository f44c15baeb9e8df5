use crate::repository::{EntityCounts, SummaryReader};
use crate::services::ServiceResult;

/// Totals shown on the dashboard home page.
pub fn load_summary<R>(repo: &R) -> ServiceResult<EntityCounts>
where
    R: SummaryReader + ?Sized,
{
    Ok(repo.count_entities()?)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    #[test]
    fn counts_are_passed_through() {
        let mut repo = MockRepository::new();
        repo.expect_count_entities().returning(|| {
            Ok(EntityCounts {
                empresas: 3,
                eventos: 120,
                ..EntityCounts::default()
            })
        });

        let counts = load_summary(&repo).unwrap();
        assert_eq!(counts.empresas, 3);
        assert_eq!(counts.eventos, 120);
    }

    #[test]
    fn storage_errors_surface() {
        let mut repo = MockRepository::new();
        repo.expect_count_entities()
            .returning(|| Err(RepositoryError::ConnectionError("pool closed".into())));

        assert!(matches!(
            load_summary(&repo),
            Err(ServiceError::Repository(RepositoryError::ConnectionError(_)))
        ));
    }
}
