//! Slot and mass type catalog maintenance.

use std::sync::Arc;

use tracing::info;

use parish_core::error::AppError;
use parish_core::result::AppResult;
use parish_core::types::SlotId;
use parish_database::{MassTypeStore, SlotStore};
use parish_entity::mass_type::is_valid_code;
use parish_entity::{CreateMassType, CreateSlot, DayType, MassType, Slot, UpdateMassType, UpdateSlot};

/// Longest accepted location or mass type name.
const MAX_NAME_LENGTH: usize = 200;

fn check_name(field: &str, value: &str) -> AppResult<()> {
    let length = value.trim().chars().count();
    if length == 0 {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if length > MAX_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

fn check_capacity(capacity: i32) -> AppResult<()> {
    if capacity < 0 {
        return Err(AppError::validation(
            "Capacity must be zero (unlimited) or positive",
        ));
    }
    Ok(())
}

/// Staff-maintained reference data.
#[derive(Clone)]
pub struct CatalogService {
    slots: Arc<dyn SlotStore>,
    mass_types: Arc<dyn MassTypeStore>,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(slots: Arc<dyn SlotStore>, mass_types: Arc<dyn MassTypeStore>) -> Self {
        Self { slots, mass_types }
    }

    /// All slots, optionally for one day-type.
    pub async fn list_slots(&self, day_type: Option<DayType>) -> AppResult<Vec<Slot>> {
        self.slots.list_slots(day_type, false).await
    }

    /// Add a slot.
    pub async fn create_slot(&self, mut input: CreateSlot) -> AppResult<Slot> {
        check_name("location", &input.location)?;
        check_capacity(input.capacity)?;
        input.location = input.location.trim().to_string();

        let slot = self.slots.create_slot(input).await?;
        info!(
            target: "audit",
            action = "slot.create",
            slot_id = %slot.id,
            day_type = %slot.day_type,
            time = %slot.time_of_day,
            capacity = slot.capacity,
            "Slot created"
        );
        Ok(slot)
    }

    /// Change a slot. Lowering capacity never cancels existing reservations.
    pub async fn update_slot(&self, id: SlotId, mut update: UpdateSlot) -> AppResult<Slot> {
        if update.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        if let Some(location) = update.location.as_deref() {
            check_name("location", location)?;
        }
        if let Some(capacity) = update.capacity {
            check_capacity(capacity)?;
        }
        update.location = update.location.map(|l| l.trim().to_string());

        let slot = self
            .slots
            .update_slot(id, update)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Slot {id} not found")))?;
        info!(target: "audit", action = "slot.update", slot_id = %id, "Slot updated");
        Ok(slot)
    }

    /// Mass types, optionally only the ones offered to the public.
    pub async fn list_mass_types(&self, active_only: bool) -> AppResult<Vec<MassType>> {
        self.mass_types.list_mass_types(active_only).await
    }

    /// Add a mass type.
    pub async fn create_mass_type(&self, mut input: CreateMassType) -> AppResult<MassType> {
        input.code = input.code.trim().to_string();
        if !is_valid_code(&input.code) {
            return Err(AppError::validation(
                "Code must be 2 to 50 lowercase letters, digits or underscores",
            ));
        }
        check_name("name", &input.name)?;
        input.name = input.name.trim().to_string();

        let mass_type = self.mass_types.create_mass_type(input).await?;
        info!(
            target: "audit",
            action = "mass_type.create",
            code = %mass_type.code,
            price = %mass_type.price,
            "Mass type created"
        );
        Ok(mass_type)
    }

    /// Change a mass type. Existing reservations keep their price.
    pub async fn update_mass_type(&self, code: &str, mut update: UpdateMassType) -> AppResult<MassType> {
        if update.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        if let Some(name) = update.name.as_deref() {
            check_name("name", name)?;
        }
        update.name = update.name.map(|n| n.trim().to_string());

        let mass_type = self
            .mass_types
            .update_mass_type(code, update)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Mass type '{code}' not found")))?;
        info!(
            target: "audit",
            action = "mass_type.update",
            code = %code,
            price = %mass_type.price,
            active = mass_type.active,
            "Mass type updated"
        );
        Ok(mass_type)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use parish_core::ErrorKind;
    use parish_database::MemoryStore;
    use parish_entity::Price;

    use super::*;

    fn catalog() -> CatalogService {
        let store = Arc::new(MemoryStore::new());
        CatalogService::new(store.clone(), store)
    }

    fn slot(capacity: i32) -> CreateSlot {
        CreateSlot {
            day_type: DayType::Weekday,
            time_of_day: NaiveTime::from_hms_opt(19, 0, 0).expect("valid time"),
            location: "  Capilla  ".to_string(),
            capacity,
            display_order: 1,
            active: true,
        }
    }

    #[tokio::test]
    async fn test_slot_rules() {
        let catalog = catalog();
        let err = catalog.create_slot(slot(-1)).await.expect_err("negative");
        assert_eq!(err.kind, ErrorKind::Validation);

        let created = catalog.create_slot(slot(10)).await.expect("create");
        assert_eq!(created.location, "Capilla");

        let updated = catalog
            .update_slot(
                created.id,
                UpdateSlot {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .expect("update");
        assert!(!updated.active);
        assert_eq!(updated.capacity, 10);

        let err = catalog
            .update_slot(SlotId::new(), UpdateSlot {
                capacity: Some(3),
                ..Default::default()
            })
            .await
            .expect_err("unknown");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_mass_type_rules() {
        let catalog = catalog();
        let input = CreateMassType {
            code: "salud".to_string(),
            name: "Salud".to_string(),
            description: None,
            price: Price::from_cents(4000).expect("price"),
            active: true,
            display_order: 1,
        };
        catalog.create_mass_type(input.clone()).await.expect("create");

        let err = catalog
            .create_mass_type(input.clone())
            .await
            .expect_err("duplicate");
        assert_eq!(err.kind, ErrorKind::Conflict);

        let err = catalog
            .create_mass_type(CreateMassType {
                code: "Bad Code".to_string(),
                ..input
            })
            .await
            .expect_err("bad code");
        assert_eq!(err.kind, ErrorKind::Validation);

        catalog
            .update_mass_type(
                "salud",
                UpdateMassType {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .expect("retire");
        assert!(catalog.list_mass_types(true).await.expect("list").is_empty());
        assert_eq!(catalog.list_mass_types(false).await.expect("list").len(), 1);
    }
}
