//! Reservation Repository
//!
//! Explicit store operations over the reservations table. Each write is a
//! single statement; concurrent edits are last-write-wins.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::{debug, info};

use crate::entities::{prelude::Reservations, reservations};
use crate::models::pagination::PER_PAGE;
use crate::models::reservation::{ReservationFilter, ValidReservation};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Reservation {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// One page of reservations together with the number of matching rows
#[derive(Debug, Clone)]
pub struct ReservationPage {
    pub reservations: Vec<reservations::Model>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Clone)]
pub struct ReservationRepository {
    db: DatabaseConnection,
}

impl ReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Look up one reservation by id
    pub async fn find(&self, id: i32) -> Result<reservations::Model, StoreError> {
        Reservations::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    /// Filtered page of reservations, latest `reserved_at` first.
    ///
    /// `search` matches a substring of the name or the phone with the
    /// store's default collation; `status` must match exactly. Both
    /// filters combine with AND. `page` is 1-based.
    pub async fn list(
        &self,
        filter: &ReservationFilter,
        page: u64,
    ) -> Result<ReservationPage, StoreError> {
        let mut select = Reservations::find();

        if let Some(ref search) = filter.search {
            select = select.filter(
                Condition::any()
                    .add(reservations::Column::CustomerName.contains(search))
                    .add(reservations::Column::Phone.contains(search)),
            );
        }

        if let Some(ref status) = filter.status {
            select = select.filter(reservations::Column::Status.eq(status.as_str()));
        }

        let total = select.clone().count(&self.db).await?;

        // Offsets past i64::MAX cannot be bound; such a page is empty anyway
        let page = page.max(1);
        let offset = (page - 1)
            .checked_mul(PER_PAGE)
            .filter(|offset| i64::try_from(*offset).is_ok());
        let reservations = match offset {
            Some(offset) => {
                select
                    .order_by_desc(reservations::Column::ReservedAt)
                    .offset(offset)
                    .limit(PER_PAGE)
                    .all(&self.db)
                    .await?
            }
            None => Vec::new(),
        };

        debug!(
            search = ?filter.search,
            status = ?filter.status,
            page,
            total,
            returned = reservations.len(),
            "Listed reservations"
        );

        Ok(ReservationPage {
            reservations,
            total,
            page,
            per_page: PER_PAGE,
        })
    }

    /// Store a new reservation and return its generated id
    pub async fn insert(&self, record: &ValidReservation) -> Result<i32, StoreError> {
        let now = Utc::now();
        let new_reservation = reservations::ActiveModel {
            customer_name: Set(record.customer_name.clone()),
            phone: Set(record.phone.clone()),
            party_size: Set(record.party_size),
            reserved_at: Set(record.reserved_at),
            status: Set(record.status.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = new_reservation.insert(&self.db).await?;
        info!(id = inserted.id, status = %record.status, "Reservation created");
        Ok(inserted.id)
    }

    /// Overwrite the editable fields of an existing reservation.
    ///
    /// Issued as one UPDATE keyed on `id`; a row that is gone by then
    /// reports `NotFound`.
    pub async fn replace(
        &self,
        id: i32,
        record: &ValidReservation,
    ) -> Result<reservations::Model, StoreError> {
        let active_model = reservations::ActiveModel {
            id: ActiveValue::Unchanged(id),
            customer_name: Set(record.customer_name.clone()),
            phone: Set(record.phone.clone()),
            party_size: Set(record.party_size),
            reserved_at: Set(record.reserved_at),
            status: Set(record.status.to_string()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };

        let updated = match active_model.update(&self.db).await {
            Ok(updated) => updated,
            Err(DbErr::RecordNotUpdated) => return Err(StoreError::NotFound(id)),
            Err(err) => return Err(err.into()),
        };
        info!(id, status = %record.status, "Reservation updated");
        Ok(updated)
    }

    /// Permanently delete a reservation
    pub async fn remove(&self, id: i32) -> Result<(), StoreError> {
        let result = Reservations::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        info!(id, "Reservation deleted");
        Ok(())
    }
}
