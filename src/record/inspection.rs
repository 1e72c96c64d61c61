//! Vehicle inspection records kept by service centers.

use super::{FieldValue, Record};
use crate::badge::{status_enum, Badge};
use crate::browser::BrowserProfile;
use crate::filter::{Bucket, BucketFilter};
use crate::pager::PagingMode;
use crate::render::Column;
use crate::sort::SortOption;
use serde::{Deserialize, Serialize};

status_enum! {
    InspectionStatus {
        Passed => ("Passed", Success),
        Failed => ("Failed", Danger),
        Pending => ("Pending", Warning),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: u64,
    pub vehicle_number: String,
    pub model: String,
    pub owner: String,
    pub inspector: String,
    /// Odometer reading in kilometres.
    pub mileage: u32,
    pub date: String,
    pub status: InspectionStatus,
}

pub const MILEAGE_BUCKETS: &[Bucket] = &[
    Bucket::range("Under 50,000 km", 0.0, 50_000.0),
    Bucket::range("50,000 - 99,999 km", 50_000.0, 100_000.0),
    Bucket::at_least("100,000+ km", 100_000.0),
];

const INSPECTIONS: BrowserProfile = BrowserProfile {
    title: "Inspection Records",
    endpoint: "inspections",
    search_fields: &["vehicleNumber", "model", "owner"],
    filters: &["status", "inspector"],
    buckets: &[BucketFilter::new("mileage", MILEAGE_BUCKETS)],
    sort_menu: &[
        SortOption::date_desc("Date (Newest)", "date"),
        SortOption::date_asc("Date (Oldest)", "date"),
        SortOption::text_asc("Vehicle (A-Z)", "vehicleNumber"),
        SortOption::number_desc("Mileage (Highest)", "mileage"),
    ],
    paging: PagingMode::Pages(50),
    columns: &[
        Column::field("Vehicle", "vehicleNumber", 9),
        Column::field("Model", "model", 20),
        Column::field("Owner", "owner", 20),
        Column::field("Inspector", "inspector", 18),
        Column::field("Mileage", "mileage", 7),
        Column::field("Date", "date", 10),
        Column::badge("Result", 10),
        Column::actions(6),
    ],
};

impl Record for Inspection {
    const PROFILE: &'static BrowserProfile = &INSPECTIONS;

    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Number(self.id as f64)),
            "vehicleNumber" => Some(FieldValue::Text(&self.vehicle_number)),
            "model" => Some(FieldValue::Text(&self.model)),
            "owner" => Some(FieldValue::Text(&self.owner)),
            "inspector" => Some(FieldValue::Text(&self.inspector)),
            "mileage" => Some(FieldValue::Number(f64::from(self.mileage))),
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
        use InspectionStatus::*;
        let rows = [
            (1, "CAB-4521", "Toyota Axio 2016", "Kamal Perera", "Asanka Gunawardena", 84_200, "2024-02-02", Passed),
            (2, "KX-7310", "Honda Vezel 2018", "Nimali Jayasinghe", "Pradeep Kumara", 61_050, "2024-02-09", Failed),
            (3, "WP-CAD-9902", "Suzuki Wagon R 2019", "M. Silva", "Asanka Gunawardena", 38_400, "2024-02-15", Passed),
            (4, "NC-5120", "Nissan X-Trail 2014", "Dilan Rajapaksha", "Gayan Rathnayake", 142_800, "2024-02-21", Pending),
            (5, "CBB-1188", "Toyota Prius 2015", "Chamara Dissanayake", "Pradeep Kumara", 120_300, "2024-03-04", Passed),
            (6, "SP-4407", "Mitsubishi Montero 2012", "Ruwan Bandara", "Gayan Rathnayake", 198_750, "2024-03-11", Failed),
        ];
        rows.into_iter()
            .map(
                |(id, vehicle_number, model, owner, inspector, mileage, date, status)| Inspection {
                    id,
                    vehicle_number: vehicle_number.to_string(),
                    model: model.to_string(),
                    owner: owner.to_string(),
                    inspector: inspector.to_string(),
                    mileage,
                    date: date.to_string(),
                    status,
                },
            )
            .collect()
    }
}
