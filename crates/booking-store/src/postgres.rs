use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    Booking, BookingId, BookingStatus, DiscountRule, Experience, ExperienceId, Money, NewBooking,
    PromoCode, Result, Slot, SlotId, SlotQuery, StoreError, normalize_code, store::BookingStore,
};

const EXPERIENCE_COLUMNS: &str = "id, title, description, location, price_cents, duration_hours, \
     rating, review_count, image_url, category, highlights, included, created_at";

const SLOT_COLUMNS: &str =
    "id, experience_id, date, time, available_spots, max_spots, created_at";

const BOOKING_COLUMNS: &str = "id, slot_id, user_name, user_email, user_phone, num_guests, \
     total_price_cents, promo_code, discount_amount_cents, status, created_at";

/// PostgreSQL-backed booking store implementation.
#[derive(Clone)]
pub struct PostgresBookingStore {
    pool: PgPool,
}

/// Converts a count column to the non-negative domain type.
fn to_u32(value: i32, column: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| StoreError::InvalidRecord(format!("negative {column}: {value}")))
}

fn to_i32(value: u32, column: &str) -> Result<i32> {
    i32::try_from(value)
        .map_err(|_| StoreError::InvalidRecord(format!("{column} out of range: {value}")))
}

/// Maps unique-key violations to `Duplicate` and constraint violations to
/// `InvalidRecord`; everything else stays a database error.
fn classify_write_error(e: sqlx::Error, what: String) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            return StoreError::Duplicate(what);
        }
        if db_err.is_foreign_key_violation() || db_err.is_check_violation() {
            return StoreError::InvalidRecord(format!("{what}: {}", db_err.message()));
        }
    }
    StoreError::Database(e)
}

impl PostgresBookingStore {
    /// Creates a new PostgreSQL booking store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_experience(row: PgRow) -> Result<Experience> {
        Ok(Experience {
            id: ExperienceId::from_uuid(row.try_get::<Uuid, _>("id")?),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            location: row.try_get("location")?,
            price: Money::from_cents(row.try_get("price_cents")?),
            duration_hours: row.try_get("duration_hours")?,
            rating: row.try_get("rating")?,
            review_count: to_u32(row.try_get("review_count")?, "review_count")?,
            image_url: row.try_get("image_url")?,
            category: row.try_get("category")?,
            highlights: row.try_get("highlights")?,
            included: row.try_get("included")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_slot(row: PgRow) -> Result<Slot> {
        Ok(Slot {
            id: SlotId::from_uuid(row.try_get::<Uuid, _>("id")?),
            experience_id: ExperienceId::from_uuid(row.try_get::<Uuid, _>("experience_id")?),
            date: row.try_get("date")?,
            time: row.try_get("time")?,
            available_spots: to_u32(row.try_get("available_spots")?, "available_spots")?,
            max_spots: to_u32(row.try_get("max_spots")?, "max_spots")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_promo(row: PgRow) -> Result<PromoCode> {
        let kind: String = row.try_get("type")?;
        Ok(PromoCode {
            code: row.try_get("code")?,
            rule: DiscountRule::from_columns(&kind, row.try_get("value_hundredths")?)?,
            min_amount: Money::from_cents(row.try_get("min_amount_cents")?),
            active: row.try_get("active")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_booking(row: PgRow) -> Result<Booking> {
        let status: String = row.try_get("status")?;
        Ok(Booking {
            id: BookingId::from_uuid(row.try_get::<Uuid, _>("id")?),
            slot_id: SlotId::from_uuid(row.try_get::<Uuid, _>("slot_id")?),
            user_name: row.try_get("user_name")?,
            user_email: row.try_get("user_email")?,
            user_phone: row.try_get("user_phone")?,
            num_guests: to_u32(row.try_get("num_guests")?, "num_guests")?,
            total_price: Money::from_cents(row.try_get("total_price_cents")?),
            promo_code: row.try_get("promo_code")?,
            discount_amount: Money::from_cents(row.try_get("discount_amount_cents")?),
            status: BookingStatus::parse(&status).ok_or_else(|| {
                StoreError::InvalidRecord(format!("unknown booking status: {status}"))
            })?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl BookingStore for PostgresBookingStore {
    async fn list_experiences(&self) -> Result<Vec<Experience>> {
        let rows = sqlx::query(&format!(
            "SELECT {EXPERIENCE_COLUMNS} FROM experiences ORDER BY rating DESC NULLS LAST"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_experience).collect()
    }

    async fn get_experience(&self, id: ExperienceId) -> Result<Option<Experience>> {
        let row = sqlx::query(&format!(
            "SELECT {EXPERIENCE_COLUMNS} FROM experiences WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_experience).transpose()
    }

    async fn put_experience(&self, experience: Experience) -> Result<()> {
        experience.validate()?;

        sqlx::query(
            r#"
            INSERT INTO experiences (id, title, description, location, price_cents, duration_hours,
                rating, review_count, image_url, category, highlights, included, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(experience.id.as_uuid())
        .bind(&experience.title)
        .bind(&experience.description)
        .bind(&experience.location)
        .bind(experience.price.cents())
        .bind(experience.duration_hours)
        .bind(experience.rating)
        .bind(to_i32(experience.review_count, "review_count")?)
        .bind(&experience.image_url)
        .bind(&experience.category)
        .bind(&experience.highlights)
        .bind(&experience.included)
        .bind(experience.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, format!("experience {}", experience.id)))?;

        Ok(())
    }

    async fn query_slots(&self, query: SlotQuery) -> Result<Vec<Slot>> {
        let mut sql = format!("SELECT {SLOT_COLUMNS} FROM slots WHERE 1=1");
        let mut param_count = 0;

        // Build dynamic query
        if query.experience_id.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND experience_id = ${param_count}"));
        }
        if query.from_date.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND date >= ${param_count}"));
        }
        if query.min_available.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND available_spots >= ${param_count}"));
        }

        sql.push_str(" ORDER BY date ASC, time ASC");

        if query.limit.is_some() {
            param_count += 1;
            sql.push_str(&format!(" LIMIT ${param_count}"));
        }

        let mut sqlx_query = sqlx::query(&sql);

        if let Some(id) = query.experience_id {
            sqlx_query = sqlx_query.bind(id.as_uuid());
        }
        if let Some(from_date) = query.from_date {
            sqlx_query = sqlx_query.bind(from_date);
        }
        if let Some(min) = query.min_available {
            sqlx_query = sqlx_query.bind(to_i32(min, "min_available")?);
        }
        if let Some(limit) = query.limit {
            sqlx_query = sqlx_query.bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows = sqlx_query.fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_slot).collect()
    }

    async fn get_slot(&self, id: SlotId) -> Result<Option<Slot>> {
        let row = sqlx::query(&format!("SELECT {SLOT_COLUMNS} FROM slots WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_slot).transpose()
    }

    async fn put_slot(&self, slot: Slot) -> Result<()> {
        slot.validate()?;

        sqlx::query(
            r#"
            INSERT INTO slots (id, experience_id, date, time, available_spots, max_spots, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(slot.id.as_uuid())
        .bind(slot.experience_id.as_uuid())
        .bind(slot.date)
        .bind(slot.time)
        .bind(to_i32(slot.available_spots, "available_spots")?)
        .bind(to_i32(slot.max_spots, "max_spots")?)
        .bind(slot.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, format!("slot {}", slot.id)))?;

        Ok(())
    }

    async fn find_active_promo_code(&self, code: &str) -> Result<Option<PromoCode>> {
        let row = sqlx::query(
            r#"
            SELECT code, type, value_hundredths, min_amount_cents, active, created_at
            FROM promo_codes
            WHERE code = $1 AND active = TRUE
            "#,
        )
        .bind(normalize_code(code))
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_promo).transpose()
    }

    async fn put_promo_code(&self, promo: PromoCode) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO promo_codes (code, type, value_hundredths, min_amount_cents, active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&promo.code)
        .bind(promo.rule.kind())
        .bind(promo.rule.value_hundredths())
        .bind(promo.min_amount.cents())
        .bind(promo.active)
        .bind(promo.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, format!("promo code {}", promo.code)))?;

        Ok(())
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<Booking> {
        booking.validate()?;

        let slot_id = booking.slot_id;
        let requested = booking.num_guests;

        // Start a transaction
        let mut tx = self.pool.begin().await?;

        // The decrement is the gate: it only matches while enough spots remain.
        let remaining: Option<i32> = sqlx::query_scalar(
            r#"
            UPDATE slots
            SET available_spots = available_spots - $2
            WHERE id = $1 AND available_spots >= $2
            RETURNING available_spots
            "#,
        )
        .bind(slot_id.as_uuid())
        .bind(to_i32(requested, "num_guests")?)
        .fetch_optional(&mut *tx)
        .await?;

        if remaining.is_none() {
            let available: Option<i32> =
                sqlx::query_scalar("SELECT available_spots FROM slots WHERE id = $1")
                    .bind(slot_id.as_uuid())
                    .fetch_optional(&mut *tx)
                    .await?;

            // Dropping the transaction rolls it back.
            return Err(match available {
                Some(available) => StoreError::InsufficientCapacity {
                    slot_id,
                    requested,
                    available: to_u32(available, "available_spots")?,
                },
                None => StoreError::SlotNotFound(slot_id),
            });
        }

        let mut row = booking.into_booking(Utc::now());

        let created_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
            INSERT INTO bookings (id, slot_id, user_name, user_email, user_phone, num_guests,
                total_price_cents, promo_code, discount_amount_cents, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING created_at
            "#,
        )
        .bind(row.id.as_uuid())
        .bind(row.slot_id.as_uuid())
        .bind(&row.user_name)
        .bind(&row.user_email)
        .bind(&row.user_phone)
        .bind(to_i32(row.num_guests, "num_guests")?)
        .bind(row.total_price.cents())
        .bind(&row.promo_code)
        .bind(row.discount_amount.cents())
        .bind(row.status.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify_write_error(e, format!("booking {}", row.id)))?;

        tx.commit().await?;

        row.created_at = created_at;
        tracing::debug!(booking_id = %row.id, %slot_id, remaining = ?remaining, "booking row committed");
        Ok(row)
    }

    async fn get_booking(&self, id: BookingId) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_booking).transpose()
    }
}
