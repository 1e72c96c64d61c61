//! Parts orders placed through the storefront.

use super::{FieldValue, Record};
use crate::badge::{status_enum, Badge};
use crate::browser::BrowserProfile;
use crate::filter::{Bucket, BucketFilter};
use crate::pager::PagingMode;
use crate::render::Column;
use crate::sort::SortOption;
use serde::{Deserialize, Serialize};

status_enum! {
    OrderStatus {
        Pending => ("Pending", Warning),
        Processing => ("Processing", Info),
        Shipped => ("Shipped", Info),
        Delivered => ("Delivered", Success),
        Cancelled => ("Cancelled", Danger),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    pub order_number: String,
    pub customer: String,
    pub part: String,
    pub category: String,
    pub quantity: u32,
    pub amount: f64,
    pub date: String,
    pub status: OrderStatus,
}

pub const AMOUNT_BUCKETS: &[Bucket] = &[
    Bucket::range("Under 100", 0.0, 100.0),
    Bucket::range("100 - 499", 100.0, 500.0),
    Bucket::at_least("500+", 500.0),
];

const ORDERS: BrowserProfile = BrowserProfile {
    title: "Order History",
    endpoint: "orders",
    search_fields: &["orderNumber", "customer", "part"],
    filters: &["status", "category"],
    buckets: &[BucketFilter::new("amount", AMOUNT_BUCKETS)],
    sort_menu: &[
        SortOption::date_desc("Date (Newest)", "date"),
        SortOption::date_asc("Date (Oldest)", "date"),
        SortOption::number_desc("Amount (High-Low)", "amount"),
        SortOption::number_asc("Amount (Low-High)", "amount"),
    ],
    paging: PagingMode::LoadMore(5),
    columns: &[
        Column::field("Order", "orderNumber", 13),
        Column::field("Customer", "customer", 20),
        Column::field("Part", "part", 22),
        Column::field("Category", "category", 11),
        Column::field("Qty", "quantity", 3),
        Column::field("Amount", "amount", 9),
        Column::field("Date", "date", 10),
        Column::badge("Status", 12),
        Column::actions(6),
    ],
};

impl Record for Order {
    const PROFILE: &'static BrowserProfile = &ORDERS;

    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Number(self.id as f64)),
            "orderNumber" => Some(FieldValue::Text(&self.order_number)),
            "customer" => Some(FieldValue::Text(&self.customer)),
            "part" => Some(FieldValue::Text(&self.part)),
            "category" => Some(FieldValue::Text(&self.category)),
            "quantity" => Some(FieldValue::Number(f64::from(self.quantity))),
            "amount" => Some(FieldValue::Number(self.amount)),
            "date" => Some(FieldValue::Date(&self.date)),
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

    fn fixtures() -> Vec<Self> {
        use OrderStatus::*;
        let rows = [
            (1, "ORD-2024-001", "Saman Kumara", "Brake Pad Set (Front)", "Brakes", 2, 84.0, "2024-01-12", Delivered),
            (2, "ORD-2024-002", "Anusha Peiris", "Oil Filter", "Engine", 3, 27.5, "2024-01-18", Delivered),
            (3, "ORD-2024-003", "Kasun Ekanayake", "Alternator 90A", "Electrical", 1, 312.0, "2024-02-03", Shipped),
            (4, "ORD-2024-004", "Erandi Gamage", "Side Mirror (Left)", "Body", 1, 145.0, "2024-02-11", Processing),
            (5, "ORD-2024-005", "Saman Kumara", "Radial Tyre 195/65 R15", "Tyres", 4, 520.0, "2024-02-20", Pending),
            (6, "ORD-2024-006", "Harsha Liyanage", "Spark Plug Set", "Engine", 1, 38.9, "2024-03-01", Cancelled),
            (7, "ORD-2024-007", "Yasodha Karunaratne", "Headlamp Assembly", "Electrical", 2, 260.0, "2024-03-09", Delivered),
            (8, "ORD-2024-008", "Buddhika Alwis", "Brake Disc Rotor", "Brakes", 2, 176.4, "2024-03-15", Shipped),
        ];
        rows.into_iter()
            .map(
                |(id, order_number, customer, part, category, quantity, amount, date, status)| Order {
                    id,
                    order_number: order_number.to_string(),
                    customer: customer.to_string(),
                    part: part.to_string(),
                    category: category.to_string(),
                    quantity,
                    amount,
                    date: date.to_string(),
                    status,
                },
            )
            .collect()
    }
}
