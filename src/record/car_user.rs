//! Registered car owners managed from the admin console.

use super::{FieldValue, Record};
use crate::badge::{status_enum, Badge};
use crate::browser::BrowserProfile;
use crate::error::Result;
use crate::pager::PagingMode;
use crate::render::Column;
use crate::sort::SortOption;
use crate::validation::{FormFields, NewCarUser};
use serde::{Deserialize, Serialize};

status_enum! {
    /// Account state of a car user.
    CarUserStatus {
        Active => ("Active", Success),
        Suspended => ("Suspended", Danger),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarUser {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    /// Number of vehicles registered to the user.
    pub vehicles: u32,
    pub join_date: String,
    pub status: CarUserStatus,
}

impl CarUser {
    #[allow(clippy::too_many_arguments)]
    fn mock(
        id: u64,
        name: &str,
        email: &str,
        phone: &str,
        city: &str,
        vehicles: u32,
        join_date: &str,
        status: CarUserStatus,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            city: city.to_string(),
            vehicles,
            join_date: join_date.to_string(),
            status,
        }
    }
}

const CAR_USERS: BrowserProfile = BrowserProfile {
    title: "Car Users",
    endpoint: "car-users",
    search_fields: &["name", "email", "phone"],
    filters: &["status", "city"],
    buckets: &[],
    sort_menu: &[
        SortOption::text_asc("Name (A-Z)", "name"),
        SortOption::text_desc("Name (Z-A)", "name"),
        SortOption::date_desc("Join Date (Newest)", "joinDate"),
        SortOption::date_asc("Join Date (Oldest)", "joinDate"),
    ],
    paging: PagingMode::Pages(5),
    columns: &[
        Column::field("ID", "id", 4),
        Column::field("Name", "name", 22),
        Column::field("Email", "email", 28),
        Column::field("Phone", "phone", 13),
        Column::field("City", "city", 11),
        Column::field("Vehicles", "vehicles", 8),
        Column::field("Joined", "joinDate", 10),
        Column::badge("Status", 12),
        Column::actions(16),
    ],
};

impl Record for CarUser {
    const PROFILE: &'static BrowserProfile = &CAR_USERS;

    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Number(self.id as f64)),
            "name" => Some(FieldValue::Text(&self.name)),
            "email" => Some(FieldValue::Text(&self.email)),
            "phone" => Some(FieldValue::Text(&self.phone)),
            "city" => Some(FieldValue::Text(&self.city)),
            "vehicles" => Some(FieldValue::Number(f64::from(self.vehicles))),
            "joinDate" => Some(FieldValue::Date(&self.join_date)),
            "status" => Some(FieldValue::Text(self.status.as_str())),
            _ => None,
        }
    }

    fn badge(&self) -> Badge<'_> {
        self.status.badge()
    }

    fn status_label(&self) -> &str {
        self.status.as_str()
    }

    fn suspended(&self) -> Option<bool> {
        Some(self.status == CarUserStatus::Suspended)
    }

    fn set_suspended(&mut self, suspended: bool) -> bool {
        self.status = if suspended {
            CarUserStatus::Suspended
        } else {
            CarUserStatus::Active
        };
        true
    }

    fn from_form(fields: &FormFields, id: u64, join_date: &str) -> Result<Self> {
        NewCarUser::from_fields(fields)?.into_record(id, join_date)
    }

    fn fixtures() -> Vec<Self> {
        use CarUserStatus::*;
        vec![
            CarUser::mock(1, "Kamal Perera", "kamal.perera@gmail.com", "077 123 4567", "Colombo", 2, "2023-01-15", Active),
            CarUser::mock(2, "Nimali Jayasinghe", "nimali.j@yahoo.com", "071 234 5678", "Kandy", 1, "2023-03-22", Active),
            CarUser::mock(3, "Ruwan Bandara", "ruwan.bandara@gmail.com", "076 345 6789", "Galle", 3, "2022-11-05", Suspended),
            CarUser::mock(4, "M. Silva", "m.silva@hotmail.com", "075 456 7890", "Negombo", 1, "2023-06-10", Active),
            CarUser::mock(5, "Tharindu Weerasinghe", "tharindu.w@gmail.com", "078 567 8901", "Colombo", 2, "2022-08-19", Suspended),
            CarUser::mock(6, "Ishara Fernando", "ishara.fernando@outlook.com", "072 678 9012", "Matara", 1, "2024-01-08", Active),
            CarUser::mock(7, "Dilan Rajapaksha", "dilan.r@gmail.com", "070 789 0123", "Kurunegala", 4, "2023-09-30", Active),
            CarUser::mock(8, "Sanduni Herath", "sanduni.herath@yahoo.com", "077 890 1234", "Jaffna", 1, "2022-05-14", Suspended),
            CarUser::mock(9, "R. De Silva", "rdesilva@gmail.com", "071 901 2345", "Kandy", 2, "2021-12-01", Suspended),
            CarUser::mock(10, "Chamara Dissanayake", "chamara.d@gmail.com", "076 012 3456", "Colombo", 1, "2024-02-20", Active),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_uses_camel_case() {
        let user = &CarUser::fixtures()[0];
        let json = serde_json::to_value(user).unwrap();
        assert_eq!(json["joinDate"], "2023-01-15");
        assert_eq!(json["status"], "Active");
    }

    #[test]
    fn test_unknown_status_survives_decoding() {
        let json = r#"{
            "id": 42, "name": "A", "email": "a@b.lk", "phone": "0771234567",
            "city": "Kandy", "vehicles": 0, "joinDate": "2024-01-01", "status": "Pending Review"
        }"#;
        let user: CarUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.status, CarUserStatus::Other("Pending Review".to_string()));
        assert_eq!(user.badge().label, "Pending Review");
        assert_eq!(user.suspended(), Some(false));
    }

    #[test]
    fn test_toggle_switches_status() {
        let mut user = CarUser::fixtures().remove(0);
        assert!(user.actions().disable);
        assert!(user.set_suspended(true));
        assert_eq!(user.status, CarUserStatus::Suspended);
        assert!(user.actions().enable);
    }
}
