use std::{io::ErrorKind, path::PathBuf};

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_log::{entities::LoggedMeal, ports::MealLogRepository},
};

/// Keeps the whole meal log as one JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileMealLogRepository {
    path: PathBuf,
}

impl JsonFileMealLogRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }

    fn quarantine_path(&self) -> PathBuf {
        let mut quarantine = self.path.clone().into_os_string();
        quarantine.push(".corrupt");
        PathBuf::from(quarantine)
    }

    /// Copies the current file aside before a later save replaces it.
    async fn quarantine(&self) -> Result<(), CoreError> {
        let target = self.quarantine_path();
        tokio::fs::copy(&self.path, &target).await.map_err(|e| {
            error!("Failed to set meal log {} aside: {}", self.path.display(), e);
            CoreError::Storage(format!("failed to set corrupt meal log aside: {}", e))
        })?;

        warn!(path = %target.display(), "Kept a copy of the unreadable meal log");
        Ok(())
    }
}

impl MealLogRepository for JsonFileMealLogRepository {
    async fn load(&self) -> Result<Vec<LoggedMeal>, CoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No meal log file yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                error!("Failed to read meal log {}: {}", self.path.display(), e);
                return Err(CoreError::Storage(format!("failed to read meal log: {}", e)));
            }
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let entries = match serde_json::from_str::<Vec<Value>>(&contents) {
            Ok(entries) => entries,
            Err(e) => {
                error!("Meal log {} is not a JSON array: {}", self.path.display(), e);
                self.quarantine().await?;
                return Ok(Vec::new());
            }
        };

        let total = entries.len();
        let mut meals = Vec::with_capacity(total);
        for (index, entry) in entries.into_iter().enumerate() {
            match LoggedMeal::from_stored(entry) {
                Ok(meal) => meals.push(meal),
                Err(e) => warn!(index, "Skipping unreadable meal log entry: {}", e),
            }
        }

        if meals.len() < total {
            self.quarantine().await?;
        }

        Ok(meals)
    }

    async fn save(&self, meals: Vec<LoggedMeal>) -> Result<(), CoreError> {
        let payload = serde_json::to_vec(&meals).map_err(|e| {
            error!("Failed to serialize meal log: {}", e);
            CoreError::Storage(format!("failed to serialize meal log: {}", e))
        })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                error!("Failed to create meal log directory: {}", e);
                CoreError::Storage(format!("failed to create meal log directory: {}", e))
            })?;
        }

        // Write then rename so a crash never leaves a half-written log.
        let staging = self.staging_path();
        tokio::fs::write(&staging, payload).await.map_err(|e| {
            error!("Failed to write meal log {}: {}", staging.display(), e);
            CoreError::Storage(format!("failed to write meal log: {}", e))
        })?;
        tokio::fs::rename(&staging, &self.path).await.map_err(|e| {
            error!("Failed to replace meal log {}: {}", self.path.display(), e);
            CoreError::Storage(format!("failed to replace meal log: {}", e))
        })?;

        debug!(path = %self.path.display(), count = meals.len(), "Meal log saved");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::domain::{
        common::generate_uuid_v7,
        nutrition::entities::{NutrientRecord, ScanResult},
    };

    fn meal(name: &str) -> LoggedMeal {
        LoggedMeal::new(
            generate_uuid_v7(),
            Utc::now(),
            ScanResult::new(
                name.to_string(),
                NutrientRecord {
                    calories: 95.0,
                    ..NutrientRecord::zeroed()
                },
                "data:image/png;base64,iVBORw0KGgo=".to_string(),
            ),
        )
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repository = JsonFileMealLogRepository::new(dir.path().join("meals.json"));

        assert!(repository.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let repository = JsonFileMealLogRepository::new(dir.path().join("nested/meals.json"));
        let meals = vec![meal("Milk"), meal("Apple")];

        repository.save(meals.clone()).await.unwrap();

        assert_eq!(repository.load().await.unwrap(), meals);
        assert!(!repository.staging_path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_loads_empty_and_is_kept_aside() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meals.json");
        std::fs::write(&path, "{ not json").unwrap();
        let repository = JsonFileMealLogRepository::new(path);

        assert!(repository.load().await.unwrap().is_empty());

        let kept = std::fs::read_to_string(repository.quarantine_path()).unwrap();
        assert_eq!(kept, "{ not json");
    }

    #[tokio::test]
    async fn test_one_bad_entry_does_not_lose_the_others() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meals.json");
        let stored = json!([
            {
                "id": "01890a5d-ac96-774b-bcce-b302099a8057",
                "loggedAt": "2024-05-01T12:00:00Z",
                "identification": "Banana",
                "nutrients": { "calories": 105, "protein": 1.3, "carbohydrates": 27, "fat": 0.4 },
                "sourceImage": "data:image/png;base64,iVBORw0KGgo="
            },
            {
                "id": "01890a5d-ac96-774b-bcce-b302099a8058",
                "loggedAt": "2024-05-01T11:00:00Z",
                "identification": "Toast",
                "nutrients": { "calories": null, "protein": 3, "carbohydrates": 14, "fat": 1 },
                "sourceImage": "data:image/png;base64,iVBORw0KGgo="
            },
            { "identification": "Broken" }
        ]);
        std::fs::write(&path, stored.to_string()).unwrap();
        let repository = JsonFileMealLogRepository::new(path);

        let meals = repository.load().await.unwrap();

        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].identification, "Banana");
        assert_eq!(meals[1].identification, "Toast");
        assert_eq!(meals[1].nutrients.calories, 0.0);
        assert!(repository.quarantine_path().exists());
    }

    #[tokio::test]
    async fn test_unreadable_path_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = JsonFileMealLogRepository::new(dir.path())
            .load()
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Storage(_)));
    }

    #[tokio::test]
    async fn test_reads_entries_written_before_extended_nutrients() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meals.json");
        let legacy = json!([{
            "id": "01890a5d-ac96-774b-bcce-b302099a8057",
            "loggedAt": "2024-05-01T12:00:00Z",
            "identification": "Toast",
            "nutrients": { "calories": 80, "protein": 3, "carbohydrates": 14, "fat": 1 },
            "sourceImage": "data:image/png;base64,iVBORw0KGgo="
        }]);
        std::fs::write(&path, legacy.to_string()).unwrap();

        let meals = JsonFileMealLogRepository::new(path).load().await.unwrap();

        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].nutrients.calories, 80.0);
        assert_eq!(meals[0].nutrients.sodium, None);
    }
}
