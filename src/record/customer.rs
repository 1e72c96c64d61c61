//! Storefront customers as seen from the parts-vendor back office.

use super::{FieldValue, Record};
use crate::badge::{status_enum, Badge};
use crate::browser::BrowserProfile;
use crate::filter::{Bucket, BucketFilter};
use crate::pager::PagingMode;
use crate::render::Column;
use crate::sort::SortOption;
use serde::{Deserialize, Serialize};

status_enum! {
    CustomerStatus {
        Active => ("Active", Success),
        Suspended => ("Suspended", Danger),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub total_orders: u32,
    /// Lifetime spend in whole currency units.
    pub total_spent: f64,
    pub join_date: String,
    pub status: CustomerStatus,
}

/// Spending ranges offered by the customer table.
pub const SPENDING_BUCKETS: &[Bucket] = &[
    Bucket::range("Under 500", 0.0, 500.0),
    Bucket::range("500 - 999", 500.0, 1000.0),
    Bucket::range("1,000 - 4,999", 1000.0, 5000.0),
    Bucket::at_least("5,000+", 5000.0),
];

/// Order-count ranges offered by the customer table. Together they cover
/// every count, including customers with no orders yet.
pub const ORDER_COUNT_BUCKETS: &[Bucket] = &[
    Bucket::through("0-5", 0.0, 5.0),
    Bucket::through("6-10", 6.0, 10.0),
    Bucket::at_least("11+", 11.0),
];

const CUSTOMERS: BrowserProfile = BrowserProfile {
    title: "Customers",
    endpoint: "customers",
    search_fields: &["name", "email", "phone"],
    filters: &["status", "city"],
    buckets: &[
        BucketFilter::new("totalSpent", SPENDING_BUCKETS),
        BucketFilter::new("totalOrders", ORDER_COUNT_BUCKETS),
    ],
    sort_menu: &[
        SortOption::text_asc("Name (A-Z)", "name"),
        SortOption::text_desc("Name (Z-A)", "name"),
        SortOption::date_desc("Join Date (Newest)", "joinDate"),
        SortOption::date_asc("Join Date (Oldest)", "joinDate"),
        SortOption::number_desc("Total Spent (Highest)", "totalSpent"),
    ],
    paging: PagingMode::Pages(5),
    columns: &[
        Column::field("ID", "id", 4),
        Column::field("Name", "name", 20),
        Column::field("Email", "email", 26),
        Column::field("City", "city", 10),
        Column::field("Orders", "totalOrders", 6),
        Column::field("Spent", "totalSpent", 10),
        Column::field("Joined", "joinDate", 10),
        Column::badge("Status", 12),
        Column::actions(16),
    ],
};

impl Record for Customer {
    const PROFILE: &'static BrowserProfile = &CUSTOMERS;

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
            "totalOrders" => Some(FieldValue::Number(f64::from(self.total_orders))),
            "totalSpent" => Some(FieldValue::Number(self.total_spent)),
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
        Some(self.status == CustomerStatus::Suspended)
    }

    fn set_suspended(&mut self, suspended: bool) -> bool {
        self.status = if suspended {
            CustomerStatus::Suspended
        } else {
            CustomerStatus::Active
        };
        true
    }

    fn fixtures() -> Vec<Self> {
        let rows: [(u64, &str, &str, &str, &str, u32, f64, &str, CustomerStatus); 12] = [
            (1, "Saman Kumara", "saman.k@gmail.com", "077 234 1100", "Colombo", 12, 5420.0, "2022-03-14", CustomerStatus::Active),
            (2, "Anusha Peiris", "anusha.p@yahoo.com", "071 553 2101", "Kandy", 3, 320.5, "2023-07-02", CustomerStatus::Active),
            (3, "Buddhika Alwis", "buddhika.alwis@gmail.com", "076 881 3102", "Galle", 7, 1890.0, "2021-11-20", CustomerStatus::Active),
            (4, "Chathuri Mendis", "chathuri.m@outlook.com", "075 902 4103", "Colombo", 1, 45.0, "2024-01-09", CustomerStatus::Suspended),
            (5, "Amal Wijesekara", "amal.w@gmail.com", "078 310 5104", "Negombo", 5, 760.0, "2022-09-30", CustomerStatus::Active),
            (6, "Erandi Gamage", "erandi.g@gmail.com", "072 420 6105", "Matara", 9, 2410.75, "2023-02-18", CustomerStatus::Active),
            (7, "Kasun Ekanayake", "kasun.e@yahoo.com", "070 530 7106", "Kandy", 15, 8800.0, "2020-06-05", CustomerStatus::Active),
            (8, "Dilani Ranasinghe", "dilani.r@gmail.com", "077 640 8107", "Colombo", 2, 180.0, "2024-03-27", CustomerStatus::Active),
            (9, "Harsha Liyanage", "harsha.l@hotmail.com", "071 750 9108", "Kurunegala", 6, 999.99, "2022-12-12", CustomerStatus::Suspended),
            (10, "Yasodha Karunaratne", "yasodha.k@gmail.com", "076 860 1209", "Galle", 10, 5000.0, "2021-04-21", CustomerStatus::Active),
            (11, "Janaka Premaratne", "janaka.p@gmail.com", "075 970 2310", "Jaffna", 4, 500.0, "2023-10-16", CustomerStatus::Active),
            (12, "Oshadi Wickremesinghe", "oshadi.w@outlook.com", "078 180 3411", "Colombo", 0, 0.0, "2024-05-01", CustomerStatus::Active),
        ];
        rows.into_iter()
            .map(
                |(id, name, email, phone, city, total_orders, total_spent, join_date, status)| Customer {
                    id,
                    name: name.to_string(),
                    email: email.to_string(),
                    phone: phone.to_string(),
                    city: city.to_string(),
                    total_orders,
                    total_spent,
                    join_date: join_date.to_string(),
                    status,
                },
            )
            .collect()
    }
}
