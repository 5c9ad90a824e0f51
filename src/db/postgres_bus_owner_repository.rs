use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::bus_owner::{BusOwner, NewBusOwner};

use super::bus_owner_repository::BusOwnerRepository;

const OWNER_COLUMNS: &str = r#"
    id, user_id, company_name, legal_entity_type, gst_number, pan_number,
    registration_doc, contact_person, email, phone, address_line1,
    address_line2, city, state, postcode, country, bank_account_name,
    bank_account_no, bank_ifsc_code, payout_method, notes, created_at
"#;

pub struct PostgresBusOwnerRepository {
    pub pool: PgPool,
}

impl PostgresBusOwnerRepository {
    async fn column_taken(&self, column: &str, value: &str) -> Result<bool, sqlx::Error> {
        // `column` comes from the fixed list below, never from the caller.
        let sql = format!("SELECT 1 FROM bus_owners WHERE {column} = $1");
        let res = sqlx::query_scalar::<_, i32>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(res.is_some())
    }
}

#[async_trait]
impl BusOwnerRepository for PostgresBusOwnerRepository {
    async fn find_conflicting_field(
        &self,
        owner: &NewBusOwner,
    ) -> Result<Option<&'static str>, sqlx::Error> {
        if let Some(user_id) = owner.user_id {
            let res = sqlx::query_scalar::<_, i32>("SELECT 1 FROM bus_owners WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
            if res.is_some() {
                return Ok(Some("user_id"));
            }
        }

        let text_checks: [(&'static str, &Option<String>); 4] = [
            ("gst_number", &owner.gst_number),
            ("pan_number", &owner.pan_number),
            ("email", &owner.email),
            ("phone", &owner.phone),
        ];
        for (field, value) in text_checks {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                if self.column_taken(field, value).await? {
                    return Ok(Some(field));
                }
            }
        }

        Ok(None)
    }

    async fn insert(&self, owner: &NewBusOwner) -> Result<BusOwner, sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO bus_owners (
                user_id, company_name, legal_entity_type, gst_number,
                pan_number, registration_doc, contact_person, email, phone,
                address_line1, address_line2, city, state, postcode,
                country, bank_account_name, bank_account_no, bank_ifsc_code,
                payout_method, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19, $20)
            RETURNING {OWNER_COLUMNS}
            "#
        );
        sqlx::query_as::<_, BusOwner>(&sql)
            .bind(owner.user_id)
            .bind(&owner.company_name)
            .bind(&owner.legal_entity_type)
            .bind(&owner.gst_number)
            .bind(&owner.pan_number)
            .bind(&owner.registration_doc)
            .bind(&owner.contact_person)
            .bind(&owner.email)
            .bind(&owner.phone)
            .bind(&owner.address_line1)
            .bind(&owner.address_line2)
            .bind(&owner.city)
            .bind(&owner.state)
            .bind(&owner.postcode)
            .bind(&owner.country)
            .bind(&owner.bank_account_name)
            .bind(&owner.bank_account_no)
            .bind(&owner.bank_ifsc_code)
            .bind(&owner.payout_method)
            .bind(&owner.notes)
            .fetch_one(&self.pool)
            .await
    }

    async fn list(&self) -> Result<Vec<BusOwner>, sqlx::Error> {
        let sql = format!("SELECT {OWNER_COLUMNS} FROM bus_owners ORDER BY created_at DESC");
        sqlx::query_as::<_, BusOwner>(&sql)
            .fetch_all(&self.pool)
            .await
    }

    async fn find_by_id(&self, owner_id: Uuid) -> Result<Option<BusOwner>, sqlx::Error> {
        let sql = format!("SELECT {OWNER_COLUMNS} FROM bus_owners WHERE id = $1");
        sqlx::query_as::<_, BusOwner>(&sql)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
    }
}
