//! Business logic services

pub mod categories;
pub mod instances;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub categories: categories::CategoriesService,
    pub instances: instances::InstancesService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            categories: categories::CategoriesService::new(repository.clone()),
            instances: instances::InstancesService::new(repository),
        }
    }
}
