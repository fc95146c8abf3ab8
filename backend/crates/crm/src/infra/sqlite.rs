//! SQLite Repository Implementations

use platform::password::HashedPassword;
use sqlx::SqlitePool;

use crate::domain::entity::{Address, AddressFields, Customer, CustomerFields, User};
use crate::domain::repository::{AddressRepository, CustomerRepository, UserRepository};
use crate::domain::value_object::{AddressId, CustomerId, Gender, UserId, UserRole};
use crate::error::{CrmError, CrmResult};

/// SQLite-backed CRM repository
///
/// One struct implements all three repository traits; handlers hold it
/// behind the trait seam so stores can be swapped in tests.
#[derive(Clone)]
pub struct SqliteCrmRepository {
    pool: SqlitePool,
}

impl SqliteCrmRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for SqliteCrmRepository {
    async fn create_user(
        &self,
        username: &str,
        password_hash: &HashedPassword,
        role: UserRole,
    ) -> CrmResult<UserId> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(username)
        .bind(password_hash.as_str())
        .bind(role.code())
        .execute(&self.pool)
        .await?;

        Ok(UserId::from_i64(result.last_insert_rowid()))
    }

    async fn find_user_by_id(&self, id: UserId) -> CrmResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, role
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_user_by_username(&self, username: &str) -> CrmResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, role
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn update_user_profile(
        &self,
        id: UserId,
        username: &str,
        password_hash: Option<&HashedPassword>,
    ) -> CrmResult<u64> {
        let result = match password_hash {
            Some(hash) => {
                sqlx::query(
                    r#"
                    UPDATE users
                    SET username = ?, password_hash = ?
                    WHERE id = ?
                    "#,
                )
                .bind(username)
                .bind(hash.as_str())
                .bind(id.as_i64())
                .execute(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    UPDATE users
                    SET username = ?
                    WHERE id = ?
                    "#,
                )
                .bind(username)
                .bind(id.as_i64())
                .execute(&self.pool)
                .await?
            }
        };

        Ok(result.rows_affected())
    }
}

// ============================================================================
// Customer Repository Implementation
// ============================================================================

impl CustomerRepository for SqliteCrmRepository {
    async fn create_customer(&self, fields: &CustomerFields) -> CrmResult<CustomerId> {
        let result = sqlx::query(
            r#"
            INSERT INTO customers (first_name, last_name, phone_number, email, gender)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.phone_number)
        .bind(&fields.email)
        .bind(fields.gender.map(|g| g.code()))
        .execute(&self.pool)
        .await?;

        Ok(CustomerId::from_i64(result.last_insert_rowid()))
    }

    async fn list_customers(&self) -> CrmResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, first_name, last_name, phone_number, email, gender
            FROM customers
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_customer()).collect()
    }

    async fn find_customer_by_id(&self, id: CustomerId) -> CrmResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, first_name, last_name, phone_number, email, gender
            FROM customers
            WHERE id = ?
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_customer()).transpose()
    }

    async fn update_customer(&self, id: CustomerId, fields: &CustomerFields) -> CrmResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET first_name = ?, last_name = ?, phone_number = ?, email = ?, gender = ?
            WHERE id = ?
            "#,
        )
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.phone_number)
        .bind(&fields.email)
        .bind(fields.gender.map(|g| g.code()))
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_customer(&self, id: CustomerId) -> CrmResult<u64> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn customer_exists(&self, id: CustomerId) -> CrmResult<bool> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM customers WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }
}

// ============================================================================
// Address Repository Implementation
// ============================================================================

impl AddressRepository for SqliteCrmRepository {
    async fn create_address(
        &self,
        customer_id: CustomerId,
        fields: &AddressFields,
    ) -> CrmResult<AddressId> {
        let result = sqlx::query(
            r#"
            INSERT INTO addresses (customer_id, address_details, city, state, pin_code)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(customer_id.as_i64())
        .bind(&fields.address_details)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.pin_code)
        .execute(&self.pool)
        .await?;

        Ok(AddressId::from_i64(result.last_insert_rowid()))
    }

    async fn list_addresses_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> CrmResult<Vec<Address>> {
        let rows = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT id, customer_id, address_details, city, state, pin_code
            FROM addresses
            WHERE customer_id = ?
            "#,
        )
        .bind(customer_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_address()).collect())
    }

    async fn delete_address(
        &self,
        customer_id: CustomerId,
        address_id: AddressId,
    ) -> CrmResult<u64> {
        // Scoped to the owning customer so a mismatched pair deletes nothing
        let result = sqlx::query("DELETE FROM addresses WHERE id = ? AND customer_id = ?")
            .bind(address_id.as_i64())
            .bind(customer_id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    role: String,
}

impl UserRow {
    fn into_user(self) -> CrmResult<User> {
        let password_hash = HashedPassword::from_phc(self.password_hash)
            .map_err(|e| CrmError::Internal(format!("Invalid password hash in store: {}", e)))?;

        let role = UserRole::parse(&self.role)
            .ok_or_else(|| CrmError::Internal(format!("Invalid role in store: {}", self.role)))?;

        Ok(User {
            id: UserId::from_i64(self.id),
            username: self.username,
            password_hash,
            role,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    first_name: String,
    last_name: String,
    phone_number: String,
    email: Option<String>,
    gender: Option<String>,
}

impl CustomerRow {
    fn into_customer(self) -> CrmResult<Customer> {
        let gender = self
            .gender
            .map(|g| {
                Gender::parse(&g)
                    .ok_or_else(|| CrmError::Internal(format!("Invalid gender in store: {}", g)))
            })
            .transpose()?;

        Ok(Customer {
            id: CustomerId::from_i64(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            email: self.email,
            gender,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AddressRow {
    id: i64,
    customer_id: i64,
    address_details: String,
    city: String,
    state: String,
    pin_code: String,
}

impl AddressRow {
    fn into_address(self) -> Address {
        Address {
            id: AddressId::from_i64(self.id),
            customer_id: CustomerId::from_i64(self.customer_id),
            address_details: self.address_details,
            city: self.city,
            state: self.state,
            pin_code: self.pin_code,
        }
    }
}
