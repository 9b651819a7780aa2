//! Class lookup and roster assembly.

use std::sync::Arc;

use classswift_core::error::AppError;
use classswift_core::result::AppResult;
use classswift_database::repositories::class::ClassRepository;
use classswift_database::repositories::seat::SeatAssignmentRepository;
use classswift_entity::class::model::Class;
use classswift_entity::seat::roster::RosterSummary;

/// Read-side service for classes and their rosters.
#[derive(Debug, Clone)]
pub struct ClassService {
    /// Class repository.
    class_repo: Arc<ClassRepository>,
    /// Seat assignment repository.
    seat_repo: Arc<SeatAssignmentRepository>,
}

impl ClassService {
    /// Creates a new class service.
    pub fn new(class_repo: Arc<ClassRepository>, seat_repo: Arc<SeatAssignmentRepository>) -> Self {
        Self {
            class_repo,
            seat_repo,
        }
    }

    /// Resolve a class by its public identifier.
    pub async fn get_class(&self, public_id: &str) -> AppResult<Class> {
        self.class_repo
            .find_by_public_id(public_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Class {public_id} not found")))
    }

    /// List all classes.
    pub async fn list_classes(&self) -> AppResult<Vec<Class>> {
        self.class_repo.find_all().await
    }

    /// Build the roster summary for a class.
    pub async fn roster(&self, class: &Class) -> AppResult<RosterSummary> {
        let students = self.seat_repo.roster_for_class(&class.id).await?;
        Ok(RosterSummary::new(students, class.total_capacity))
    }
}
