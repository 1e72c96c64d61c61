//! Record types shown by the browser and the trait that exposes their fields.

pub mod car_user;
pub mod customer;
pub mod employee;
pub mod inspection;
pub mod order;

pub use car_user::{CarUser, CarUserStatus};
pub use customer::{Customer, CustomerStatus};
pub use employee::{Employee, EmployeeStatus};
pub use inspection::{Inspection, InspectionStatus};
pub use order::{Order, OrderStatus};

use crate::badge::{Badge, RowActions};
use crate::browser::BrowserProfile;
use crate::validation::FormFields;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;

/// A single scalar field value, borrowed from the record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
    /// ISO `YYYY-MM-DD` date string, parsed only when sorting.
    Date(&'a str),
}

impl<'a> FieldValue<'a> {
    pub fn display(&self) -> Cow<'a, str> {
        match *self {
            FieldValue::Text(s) | FieldValue::Date(s) => Cow::Borrowed(s),
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Cow::Owned(format!("{}", n as i64))
            }
            FieldValue::Number(n) => Cow::Owned(format!("{:.2}", n)),
        }
    }

    /// Case-insensitive substring test; `needle` must already be lowercase.
    pub fn contains_lowercase(&self, needle: &str) -> bool {
        self.display().to_lowercase().contains(needle)
    }

    /// Equality against a raw filter selection.
    pub fn matches_selection(&self, raw: &str) -> bool {
        match *self {
            FieldValue::Text(s) | FieldValue::Date(s) => s.trim().eq_ignore_ascii_case(raw.trim()),
            FieldValue::Number(n) => raw.trim().parse::<f64>().map(|v| v == n).unwrap_or(false),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match *self {
            FieldValue::Number(n) if !n.is_nan() => Some(n),
            _ => None,
        }
    }
}

/// A flat entity displayed as one table row.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Search, filter, sort, paging and column setup for this entity.
    const PROFILE: &'static BrowserProfile;

    fn id(&self) -> u64;

    /// Look up a display field by its wire name.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    fn badge(&self) -> Badge<'_>;

    /// Raw status string, as sent to and from the backend.
    fn status_label(&self) -> &str;

    /// `Some(true)` when the record is suspended, `None` for entities
    /// without an enable/disable toggle.
    fn suspended(&self) -> Option<bool> {
        None
    }

    /// Flip the enable/disable state. Returns false when unsupported.
    fn set_suspended(&mut self, _suspended: bool) -> bool {
        false
    }

    fn actions(&self) -> RowActions {
        match self.suspended() {
            Some(suspended) => RowActions::toggle(suspended),
            None => RowActions::VIEW_ONLY,
        }
    }

    /// Build a new record from `add` form fields. Entities without an add
    /// form refuse with `NotCreatable`.
    fn from_form(_fields: &FormFields, _id: u64, _join_date: &str) -> crate::error::Result<Self> {
        Err(crate::error::Error::NotCreatable(Self::PROFILE.title))
    }

    /// Built-in mock data set.
    fn fixtures() -> Vec<Self>;
}

/// The entity kinds the application browses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Entity {
    CarUsers,
    Employees,
    Customers,
    Orders,
    Inspections,
}

impl Entity {
    pub const ALL: [Entity; 5] = [
        Entity::CarUsers,
        Entity::Employees,
        Entity::Customers,
        Entity::Orders,
        Entity::Inspections,
    ];

    pub fn profile(&self) -> &'static BrowserProfile {
        match self {
            Entity::CarUsers => CarUser::PROFILE,
            Entity::Employees => Employee::PROFILE,
            Entity::Customers => Customer::PROFILE,
            Entity::Orders => Order::PROFILE,
            Entity::Inspections => Inspection::PROFILE,
        }
    }

    /// URL path segment, e.g. `car-users`.
    pub fn endpoint(&self) -> &'static str {
        self.profile().endpoint
    }

    pub fn from_endpoint(segment: &str) -> Option<Entity> {
        Entity::ALL
            .into_iter()
            .find(|entity| entity.endpoint() == segment)
    }

    /// Like [`Entity::from_endpoint`], failing with `UnknownEntity`.
    pub fn parse(segment: &str) -> crate::error::Result<Entity> {
        Entity::from_endpoint(segment.trim())
            .ok_or_else(|| crate::error::Error::UnknownEntity(segment.to_string()))
    }

    pub fn status_labels(&self) -> &'static [&'static str] {
        match self {
            Entity::CarUsers => CarUserStatus::LABELS,
            Entity::Employees => EmployeeStatus::LABELS,
            Entity::Customers => CustomerStatus::LABELS,
            Entity::Orders => OrderStatus::LABELS,
            Entity::Inspections => InspectionStatus::LABELS,
        }
    }

    /// Fixture records as JSON values, for the mock backend.
    pub fn fixtures_json(&self) -> serde_json::Result<Vec<serde_json::Value>> {
        fn encode<R: Record>() -> serde_json::Result<Vec<serde_json::Value>> {
            R::fixtures().iter().map(serde_json::to_value).collect()
        }
        match self {
            Entity::CarUsers => encode::<CarUser>(),
            Entity::Employees => encode::<Employee>(),
            Entity::Customers => encode::<Customer>(),
            Entity::Orders => encode::<Order>(),
            Entity::Inspections => encode::<Inspection>(),
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.profile().title)
    }
}
