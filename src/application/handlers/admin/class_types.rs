//! Admin class type management.

use std::sync::Arc;

use crate::domain::foundation::{ClassTypeId, Currency, Price, UserId};
use crate::domain::schedule::{ClassType, ScheduleError};
use crate::ports::{ClassTypeRepository, MemberRepository};

use super::AdminGuard;

/// Fields staff edit on a class type. The price is typed in major units
/// ("12.50" or "12,50").
#[derive(Debug, Clone)]
pub struct ClassTypeFields {
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    /// Defaults to the studio currency.
    pub currency: Option<String>,
}

impl ClassTypeFields {
    fn price(&self, default_currency: &Currency) -> Result<Price, ScheduleError> {
        let currency = match self.currency.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => Currency::new(code)?,
            _ => default_currency.clone(),
        };
        Ok(Price::parse_major(&self.price, currency)?)
    }
}

pub struct AdminListClassTypesHandler {
    guard: AdminGuard,
    class_types: Arc<dyn ClassTypeRepository>,
}

impl AdminListClassTypesHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        class_types: Arc<dyn ClassTypeRepository>,
    ) -> Self {
        Self {
            guard: AdminGuard::new(members),
            class_types,
        }
    }

    pub async fn handle(&self, requested_by: &UserId) -> Result<Vec<ClassType>, ScheduleError> {
        self.guard.require_admin(requested_by).await?;
        Ok(self.class_types.list_all().await?)
    }
}

#[derive(Debug, Clone)]
pub struct CreateClassTypeCommand {
    pub requested_by: UserId,
    pub fields: ClassTypeFields,
}

pub struct CreateClassTypeHandler {
    guard: AdminGuard,
    class_types: Arc<dyn ClassTypeRepository>,
    default_currency: Currency,
}

impl CreateClassTypeHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        class_types: Arc<dyn ClassTypeRepository>,
        default_currency: Currency,
    ) -> Self {
        Self {
            guard: AdminGuard::new(members),
            class_types,
            default_currency,
        }
    }

    pub async fn handle(&self, cmd: CreateClassTypeCommand) -> Result<ClassType, ScheduleError> {
        self.guard.require_admin(&cmd.requested_by).await?;

        let price = cmd.fields.price(&self.default_currency)?;
        let class_type = ClassType::new(
            ClassTypeId::new(),
            cmd.fields.name,
            cmd.fields.description,
            price,
        )?;
        self.class_types.save(&class_type).await?;

        tracing::info!(class_type_id = %class_type.id(), name = class_type.name(), "Class type created");
        Ok(class_type)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateClassTypeCommand {
    pub requested_by: UserId,
    pub class_type_id: ClassTypeId,
    pub fields: ClassTypeFields,
}

pub struct UpdateClassTypeHandler {
    guard: AdminGuard,
    class_types: Arc<dyn ClassTypeRepository>,
    default_currency: Currency,
}

impl UpdateClassTypeHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        class_types: Arc<dyn ClassTypeRepository>,
        default_currency: Currency,
    ) -> Self {
        Self {
            guard: AdminGuard::new(members),
            class_types,
            default_currency,
        }
    }

    pub async fn handle(&self, cmd: UpdateClassTypeCommand) -> Result<ClassType, ScheduleError> {
        self.guard.require_admin(&cmd.requested_by).await?;

        let mut class_type = self
            .class_types
            .find_by_id(&cmd.class_type_id)
            .await?
            .ok_or(ScheduleError::ClassTypeNotFound(cmd.class_type_id))?;

        let price = cmd.fields.price(&self.default_currency)?;
        class_type.update(cmd.fields.name, cmd.fields.description, price)?;
        self.class_types.update(&class_type).await?;

        Ok(class_type)
    }
}
