//! Service-center staff.

use super::{FieldValue, Record};
use crate::badge::{status_enum, Badge};
use crate::browser::BrowserProfile;
use crate::error::Result;
use crate::pager::PagingMode;
use crate::render::Column;
use crate::sort::SortOption;
use crate::validation::{FormFields, NewEmployee};
use serde::{Deserialize, Serialize};

status_enum! {
    /// Availability of an employee on the workshop floor.
    EmployeeStatus {
        Available => ("Available", Success),
        OnWork => ("On Work", Info),
        Unavailable => ("Unavailable", Warning),
        Suspended => ("Suspended", Danger),
        Resigned => ("Resigned", Muted),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: u64,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub join_date: String,
    pub status: EmployeeStatus,
}

const EMPLOYEES: BrowserProfile = BrowserProfile {
    title: "Employees",
    endpoint: "employees",
    search_fields: &["name", "email", "phone"],
    filters: &["status", "role"],
    buckets: &[],
    sort_menu: &[
        SortOption::text_asc("Name (A-Z)", "name"),
        SortOption::text_desc("Name (Z-A)", "name"),
        SortOption::date_desc("Join Date (Newest)", "joinDate"),
        SortOption::date_asc("Join Date (Oldest)", "joinDate"),
    ],
    paging: PagingMode::LoadMore(4),
    columns: &[
        Column::field("ID", "id", 4),
        Column::field("Name", "name", 22),
        Column::field("Role", "role", 18),
        Column::field("Email", "email", 24),
        Column::field("Phone", "phone", 13),
        Column::badge("Status", 14),
        Column::actions(16),
    ],
};

impl Record for Employee {
    const PROFILE: &'static BrowserProfile = &EMPLOYEES;

    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Number(self.id as f64)),
            "name" => Some(FieldValue::Text(&self.name)),
            "role" => Some(FieldValue::Text(&self.role)),
            "email" => Some(FieldValue::Text(&self.email)),
            "phone" => Some(FieldValue::Text(&self.phone)),
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
        Some(self.status == EmployeeStatus::Suspended)
    }

    // Re-enabled staff come back as Available rather than their previous state.
    fn set_suspended(&mut self, suspended: bool) -> bool {
        self.status = if suspended {
            EmployeeStatus::Suspended
        } else {
            EmployeeStatus::Available
        };
        true
    }

    fn from_form(fields: &FormFields, id: u64, join_date: &str) -> Result<Self> {
        NewEmployee::from_fields(fields)?.into_record(id, join_date)
    }

    fn fixtures() -> Vec<Self> {
        use EmployeeStatus::*;
        let rows = [
            (1, "Asanka Gunawardena", "Senior Technician", "asanka.g@autohub.lk", "077 111 2233", "2020-04-12", Available),
            (2, "Pradeep Kumara", "Technician", "pradeep.k@autohub.lk", "071 222 3344", "2021-07-01", OnWork),
            (3, "Malsha Wickramasinghe", "Service Advisor", "malsha.w@autohub.lk", "076 333 4455", "2022-02-15", Available),
            (4, "Nuwan Senanayake", "Technician", "nuwan.s@autohub.lk", "075 444 5566", "2019-11-20", Unavailable),
            (5, "Hasini Abeysekara", "Cashier", "hasini.a@autohub.lk", "078 555 6677", "2023-05-03", Suspended),
            (6, "Lahiru Madushanka", "Painter", "lahiru.m@autohub.lk", "072 666 7788", "2018-09-09", Resigned),
            (7, "Gayan Rathnayake", "Technician", "gayan.r@autohub.lk", "070 777 8899", "2022-12-01", OnWork),
            (8, "Dinithi Samarasinghe", "Service Advisor", "dinithi.s@autohub.lk", "077 888 9900", "2024-03-18", Available),
        ];
        rows.into_iter()
            .map(|(id, name, role, email, phone, join_date, status)| Employee {
                id,
                name: name.to_string(),
                role: role.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                join_date: join_date.to_string(),
                status,
            })
            .collect()
    }
}
