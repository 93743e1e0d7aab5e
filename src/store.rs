use crate::errors::AppError;
use crate::models::{Contact, ContactRequest};
use crate::validation;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

/// Persistence gateway for the contact collection.
///
/// Thin facade over the PostgreSQL pool. All identifier-format knowledge
/// lives here: callers hand `find_by_id` the raw path segment and the
/// store decides whether it is even a well-formed identifier.
#[derive(Clone)]
pub struct ContactStore {
    pool: PgPool,
}

impl ContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens the connection pool and verifies connectivity, so a bad
    /// database URL fails process startup rather than the first request.
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        // startup connectivity probe
        sqlx::query("SELECT 1").execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Validates and persists one contact, returning the stored record with
    /// its store-assigned identifier.
    ///
    /// Validation runs before any SQL, so a rejected write is atomic. A
    /// store-side rejection (constraint violation, connectivity) surfaces
    /// as `PersistenceWrite` with the underlying message.
    pub async fn create(&self, fields: &ContactRequest) -> Result<Contact, AppError> {
        validation::validate_contact(fields)?;

        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts
                (firstname, lastname, email, personal_number, address, zip_code, city, country)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, firstname, lastname, email, personal_number,
                      address, zip_code, city, country, lat, lng
            "#,
        )
        .bind(&fields.firstname)
        .bind(&fields.lastname)
        .bind(&fields.email)
        .bind(&fields.personal_number)
        .bind(&fields.address)
        .bind(&fields.zip_code)
        .bind(&fields.city)
        .bind(&fields.country)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::PersistenceWrite(e.to_string()))?;

        tracing::info!("Created contact {}", contact.id);
        Ok(contact)
    }

    /// Returns every persisted contact in store-defined order. No
    /// pagination, no filtering.
    pub async fn list_all(&self) -> Result<Vec<Contact>, AppError> {
        let contacts = sqlx::query_as::<_, Contact>(
            "SELECT id, firstname, lastname, email, personal_number, \
             address, zip_code, city, country, lat, lng FROM contacts",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    /// Looks up one contact by its identifier.
    ///
    /// A string that does not parse as a UUID is the distinct malformed-
    /// identifier condition; a well-formed identifier with no row is
    /// `Ok(None)`.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Contact>, AppError> {
        let contact_id = Uuid::parse_str(id).map_err(|_| AppError::MalformedId)?;

        let contact = sqlx::query_as::<_, Contact>(
            "SELECT id, firstname, lastname, email, personal_number, \
             address, zip_code, city, country, lat, lng FROM contacts WHERE id = $1",
        )
        .bind(contact_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }
}
