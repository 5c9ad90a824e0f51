use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BusOwner {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company_name: String,
    pub legal_entity_type: Option<String>,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub registration_doc: Option<String>,
    pub contact_person: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub bank_account_name: Option<String>,
    pub bank_account_no: Option<String>,
    pub bank_ifsc_code: Option<String>,
    pub payout_method: Option<String>,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewBusOwner {
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub company_name: String,
    pub legal_entity_type: Option<String>,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub registration_doc: Option<String>,
    #[serde(default)]
    pub contact_person: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub bank_account_name: Option<String>,
    pub bank_account_no: Option<String>,
    pub bank_ifsc_code: Option<String>,
    pub payout_method: Option<String>,
    pub notes: Option<String>,
}
