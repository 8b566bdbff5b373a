use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::resource::{EnvelopeStyle, FieldValue, Resource, ResourceSchema};
use crate::domain::types::{CategoryId, MedicineId, code_enum};

code_enum!(
    /// Stock state of a medicine in the pharmacy.
    MedicineStatus, "medicine status" {
        Available => "AVAILABLE",
        LowStock => "LOW_STOCK",
        OutOfStock => "OUT_OF_STOCK",
        Discontinued => "DISCONTINUED",
    }
);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub id: MedicineId,
    pub code: String,
    pub name: String,
    pub category_id: CategoryId,
    /// Dispensing unit, e.g. `tablet` or `vial`.
    pub unit: String,
    /// Unit price in minor currency units.
    pub price: i64,
    pub stock: i64,
    pub expiry_date: NaiveDate,
    pub status: MedicineStatus,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicine {
    pub code: String,
    pub name: String,
    pub category_id: CategoryId,
    pub unit: String,
    pub price: i64,
    pub stock: i64,
    pub expiry_date: NaiveDate,
    pub status: MedicineStatus,
}

impl Resource for Medicine {
    const SCHEMA: ResourceSchema = ResourceSchema {
        path: "medicines",
        searchable: &["code", "name"],
        filterable: &["categoryId", "status"],
        sortable: &["id", "code", "name", "price", "stock", "expiryDate"],
        date_field: Some("expiryDate"),
        role: "pharmacy",
        envelope: EnvelopeStyle::Data,
    };

    fn id(&self) -> i32 {
        self.id.get()
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value: FieldValue<'_> = match name {
            "id" => self.id.get().into(),
            "code" => self.code.as_str().into(),
            "name" => self.name.as_str().into(),
            "categoryId" => self.category_id.get().into(),
            "unit" => self.unit.as_str().into(),
            "price" => self.price.into(),
            "stock" => self.stock.into(),
            "expiryDate" => self.expiry_date.into(),
            "status" => self.status.as_str().into(),
            _ => return None,
        };
        Some(value)
    }
}
