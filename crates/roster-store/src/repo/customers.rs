use crate::error::{InsertError, Result, StoreError};
use roster_core::domain::{Customer, CustomerId, NewCustomer};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Result of a create call that got as far as the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(Customer),
    DuplicateEmail,
}

/// Storage operations the create and list paths need.
///
/// `insert` must report a uniqueness rejection as
/// [`InsertError::ConstraintViolation`] and must let the table assign the id.
pub trait CustomerTable {
    fn email_exists(&self, email: &str) -> Result<bool>;
    fn insert(&self, customer: &NewCustomer) -> std::result::Result<Customer, InsertError>;
    fn list_by_id(&self) -> Result<Vec<Customer>>;
    fn get(&self, id: CustomerId) -> Result<Option<Customer>>;
}

/// Pre-check then insert. The unique index decides when two writers pass the
/// pre-check together; the loser gets the same `DuplicateEmail` as the
/// pre-check would have given.
pub fn create_customer<T: CustomerTable + ?Sized>(
    table: &T,
    customer: &NewCustomer,
) -> Result<CreateOutcome> {
    if table.email_exists(customer.email())? {
        return Ok(CreateOutcome::DuplicateEmail);
    }

    match table.insert(customer) {
        Ok(created) => Ok(CreateOutcome::Created(created)),
        Err(InsertError::ConstraintViolation) => {
            tracing::debug!(
                email = customer.email(),
                "unique index rejected insert after pre-check passed"
            );
            Ok(CreateOutcome::DuplicateEmail)
        }
        Err(InsertError::Store(err)) => Err(err),
    }
}

pub struct CustomersRepo<'a> {
    conn: &'a Connection,
}

impl<'a> CustomersRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, customer: &NewCustomer) -> Result<CreateOutcome> {
        create_customer(self, customer)
    }

    pub fn list(&self) -> Result<Vec<Customer>> {
        self.list_by_id()
    }
}

impl CustomerTable for CustomersRepo<'_> {
    fn email_exists(&self, email: &str) -> Result<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM customers WHERE email = ?1 LIMIT 1;",
                [email],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn insert(&self, customer: &NewCustomer) -> std::result::Result<Customer, InsertError> {
        self.conn.execute(
            "INSERT INTO customers (nome, email) VALUES (?1, ?2);",
            params![customer.name(), customer.email()],
        )?;
        let id = CustomerId(self.conn.last_insert_rowid());
        let created = self
            .get(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(created)
    }

    fn list_by_id(&self) -> Result<Vec<Customer>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, nome, email FROM customers ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut customers = Vec::new();
        while let Some(row) = rows.next()? {
            customers.push(customer_from_row(row)?);
        }
        Ok(customers)
    }

    fn get(&self, id: CustomerId) -> Result<Option<Customer>> {
        let customer = self
            .conn
            .query_row(
                "SELECT id, nome, email FROM customers WHERE id = ?1;",
                [id.as_i64()],
                customer_from_row,
            )
            .optional()?;
        Ok(customer)
    }
}

fn customer_from_row(row: &Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: CustomerId(row.get(0)?),
        name: row.get(1)?,
        email: row.get(2)?,
    })
}
