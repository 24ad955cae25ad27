//! ListClassTypesHandler - all class types, ordered by name.

use std::sync::Arc;

use crate::domain::schedule::{ClassType, ScheduleError};
use crate::ports::ClassTypeRepository;

pub struct ListClassTypesHandler {
    class_types: Arc<dyn ClassTypeRepository>,
}

impl ListClassTypesHandler {
    pub fn new(class_types: Arc<dyn ClassTypeRepository>) -> Self {
        Self { class_types }
    }

    pub async fn handle(&self) -> Result<Vec<ClassType>, ScheduleError> {
        Ok(self.class_types.list_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;

    #[tokio::test]
    async fn lists_by_name() {
        let fx = Fixture::new();
        fx.class_type("Yoga", 1000).await;
        fx.class_type("Barre", 1000).await;

        let names: Vec<String> = ListClassTypesHandler::new(fx.class_types.clone())
            .handle()
            .await
            .unwrap()
            .iter()
            .map(|ct| ct.name().to_string())
            .collect();
        assert_eq!(names, vec!["Barre", "Yoga"]);
    }
}
