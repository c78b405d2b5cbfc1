use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::branches::dtos::BranchResponseDto;
use crate::features::branches::repositories::BranchRepository;
use crate::shared::validation::non_blank;

pub struct BranchService {
    branches: Arc<dyn BranchRepository>,
}

impl BranchService {
    pub fn new(branches: Arc<dyn BranchRepository>) -> Self {
        Self { branches }
    }

    pub async fn list(&self) -> Result<Vec<BranchResponseDto>> {
        let branches = self.branches.list().await?;
        Ok(branches.into_iter().map(Into::into).collect())
    }

    pub async fn create(&self, name: &str) -> Result<BranchResponseDto> {
        let name = non_blank(name)
            .ok_or_else(|| AppError::Validation("Branch name cannot be empty".to_string()))?;

        let branch = self.branches.insert(name).await?;
        tracing::info!("Branch '{}' created", branch.name);
        Ok(branch.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.branches.delete(id).await? {
            return Err(AppError::NotFound(format!("Branch {} not found", id)));
        }
        tracing::info!("Branch {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::InMemoryBranches;

    fn service() -> BranchService {
        BranchService::new(Arc::new(InMemoryBranches::default()))
    }

    #[tokio::test]
    async fn test_create_trims_and_lists_by_name() {
        let service = service();
        service.create("  Mechanical ").await.unwrap();
        service.create("Civil").await.unwrap();

        let names: Vec<_> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, vec!["Civil", "Mechanical"]);
    }

    #[tokio::test]
    async fn test_duplicate_and_blank_names() {
        let service = service();
        service.create("Civil").await.unwrap();

        assert!(matches!(
            service.create("Civil").await,
            Err(AppError::Conflict(_))
        ));
        assert!(matches!(
            service.create("   ").await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service();
        let branch = service.create("Electrical").await.unwrap();

        service.delete(branch.id).await.unwrap();
        assert!(service.list().await.unwrap().is_empty());
        assert!(matches!(
            service.delete(branch.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
