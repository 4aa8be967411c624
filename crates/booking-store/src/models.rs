//! Records held by the booking store.
//!
//! One struct per table. Experiences and promo codes are read-only to the
//! booking core; slots only ever change through the capacity decrement in
//! [`crate::BookingStore::create_booking`]; bookings are insert-only.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BookingId, ExperienceId, Money, Percent, Result, SlotId, StoreError};

/// A bookable activity in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: ExperienceId,
    pub title: String,
    pub description: String,
    pub location: String,
    /// Price per guest.
    pub price: Money,
    pub duration_hours: f64,
    /// Average rating in `0..=5`, absent until the first review.
    pub rating: Option<f64>,
    pub review_count: u32,
    pub image_url: String,
    pub category: String,
    pub highlights: Vec<String>,
    pub included: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Experience {
    /// Highest price per guest a store accepts (₹1,00,00,000).
    ///
    /// Keeps `price * guests` within `i64` for any `u32` guest count.
    pub const MAX_PRICE: Money = Money::from_cents(1_000_000_000);

    /// Creates a new builder for constructing an experience.
    pub fn builder() -> ExperienceBuilder {
        ExperienceBuilder::default()
    }

    /// Checks the price, duration and rating ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.price.is_positive() || self.price > Self::MAX_PRICE {
            return Err(StoreError::InvalidRecord(format!(
                "experience price must be within ₹0.01..={}, got {}",
                Self::MAX_PRICE,
                self.price
            )));
        }

        if self.duration_hours.is_nan() || self.duration_hours <= 0.0 {
            return Err(StoreError::InvalidRecord(
                "experience duration must be positive".to_string(),
            ));
        }

        if let Some(rating) = self.rating
            && !(0.0..=5.0).contains(&rating)
        {
            return Err(StoreError::InvalidRecord(format!(
                "experience rating must be within 0..=5, got {rating}"
            )));
        }

        Ok(())
    }
}

/// Builder for [`Experience`].
#[derive(Debug, Default)]
pub struct ExperienceBuilder {
    id: Option<ExperienceId>,
    title: Option<String>,
    description: String,
    location: Option<String>,
    price: Option<Money>,
    duration_hours: Option<f64>,
    rating: Option<f64>,
    review_count: u32,
    image_url: String,
    category: Option<String>,
    highlights: Vec<String>,
    included: Vec<String>,
    created_at: Option<DateTime<Utc>>,
}

impl ExperienceBuilder {
    /// Sets the ID. If not set, a new ID will be generated.
    pub fn id(mut self, id: ExperienceId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    pub fn duration_hours(mut self, hours: f64) -> Self {
        self.duration_hours = Some(hours);
        self
    }

    /// Sets the aggregate rating and the number of reviews behind it.
    pub fn rating(mut self, rating: f64, review_count: u32) -> Self {
        self.rating = Some(rating);
        self.review_count = review_count;
        self
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Appends a highlight line.
    pub fn highlight(mut self, highlight: impl Into<String>) -> Self {
        self.highlights.push(highlight.into());
        self
    }

    /// Appends an included-item line.
    pub fn included(mut self, item: impl Into<String>) -> Self {
        self.included.push(item.into());
        self
    }

    /// Sets the creation time. If not set, the current time will be used.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the experience, validating required fields and value ranges.
    pub fn build(self) -> Result<Experience> {
        let missing = |field: &str| StoreError::InvalidRecord(format!("experience {field} is required"));

        let experience = Experience {
            id: self.id.unwrap_or_default(),
            title: self.title.ok_or_else(|| missing("title"))?,
            description: self.description,
            location: self.location.ok_or_else(|| missing("location"))?,
            price: self.price.ok_or_else(|| missing("price"))?,
            duration_hours: self.duration_hours.ok_or_else(|| missing("duration"))?,
            rating: self.rating,
            review_count: self.review_count,
            image_url: self.image_url,
            category: self.category.ok_or_else(|| missing("category"))?,
            highlights: self.highlights,
            included: self.included,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        };
        experience.validate()?;
        Ok(experience)
    }
}

/// A bookable date/time instance of an experience with finite capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub experience_id: ExperienceId,
    pub date: NaiveDate,
    /// Local time of day, no timezone.
    pub time: NaiveTime,
    pub available_spots: u32,
    pub max_spots: u32,
    pub created_at: DateTime<Utc>,
}

impl Slot {
    /// Creates an empty slot with every spot available.
    pub fn new(
        experience_id: ExperienceId,
        date: NaiveDate,
        time: NaiveTime,
        max_spots: u32,
    ) -> Result<Self> {
        if max_spots == 0 {
            return Err(StoreError::InvalidRecord(
                "slot max_spots must be positive".to_string(),
            ));
        }
        Ok(Self {
            id: SlotId::new(),
            experience_id,
            date,
            time,
            available_spots: max_spots,
            max_spots,
            created_at: Utc::now(),
        })
    }

    /// Overrides the number of available spots.
    pub fn with_available_spots(mut self, available_spots: u32) -> Result<Self> {
        self.available_spots = available_spots;
        self.validate()?;
        Ok(self)
    }

    /// Checks `0 < max_spots` and `available_spots <= max_spots`.
    pub fn validate(&self) -> Result<()> {
        if self.max_spots == 0 {
            return Err(StoreError::InvalidRecord(format!(
                "slot {} has no capacity",
                self.id
            )));
        }
        if self.available_spots > self.max_spots {
            return Err(StoreError::InvalidRecord(format!(
                "slot {} has {} available spots but only {} in total",
                self.id, self.available_spots, self.max_spots
            )));
        }
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.available_spots == 0
    }

    pub fn booked_spots(&self) -> u32 {
        self.max_spots - self.available_spots
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Confirmed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
        }
    }

    /// Parses the persisted column value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "confirmed" => Some(BookingStatus::Confirmed),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted reservation of guests against a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub slot_id: SlotId,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub num_guests: u32,
    /// Amount charged, after discount.
    pub total_price: Money,
    pub promo_code: Option<String>,
    pub discount_amount: Money,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// A booking as submitted for insertion; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub slot_id: SlotId,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub num_guests: u32,
    pub total_price: Money,
    pub promo_code: Option<String>,
    pub discount_amount: Money,
}

impl NewBooking {
    /// Rejects rows the bookings table would refuse.
    pub fn validate(&self) -> Result<()> {
        if self.num_guests == 0 {
            return Err(StoreError::InvalidRecord(
                "booking must have at least one guest".to_string(),
            ));
        }
        if self.total_price.is_negative() || self.discount_amount.is_negative() {
            return Err(StoreError::InvalidRecord(
                "booking amounts must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Materializes the row with a fresh id, status `confirmed`.
    pub fn into_booking(self, created_at: DateTime<Utc>) -> Booking {
        Booking {
            id: BookingId::new(),
            slot_id: self.slot_id,
            user_name: self.user_name,
            user_email: self.user_email,
            user_phone: self.user_phone,
            num_guests: self.num_guests,
            total_price: self.total_price,
            promo_code: self.promo_code,
            discount_amount: self.discount_amount,
            status: BookingStatus::Confirmed,
            created_at,
        }
    }
}

/// How a promo code reduces the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum DiscountRule {
    /// A share of the subtotal.
    Percentage(Percent),
    /// A flat amount off.
    Fixed(Money),
}

impl DiscountRule {
    pub const PERCENTAGE: &'static str = "percentage";
    pub const FIXED: &'static str = "fixed";

    /// The `type` column value.
    pub fn kind(&self) -> &'static str {
        match self {
            DiscountRule::Percentage(_) => Self::PERCENTAGE,
            DiscountRule::Fixed(_) => Self::FIXED,
        }
    }

    /// The `value_hundredths` column value: basis points or cents.
    pub fn value_hundredths(&self) -> i64 {
        match self {
            DiscountRule::Percentage(p) => i64::from(p.basis_points()),
            DiscountRule::Fixed(m) => m.cents(),
        }
    }

    /// Rebuilds a rule from its two persisted columns.
    pub fn from_columns(kind: &str, value_hundredths: i64) -> Result<Self> {
        let invalid = || {
            StoreError::InvalidRecord(format!(
                "invalid promo rule: type={kind} value={value_hundredths}"
            ))
        };
        if value_hundredths <= 0 {
            return Err(invalid());
        }
        match kind {
            Self::PERCENTAGE => u32::try_from(value_hundredths)
                .ok()
                .and_then(Percent::from_basis_points)
                .map(DiscountRule::Percentage)
                .ok_or_else(invalid),
            Self::FIXED => Ok(DiscountRule::Fixed(Money::from_cents(value_hundredths))),
            _ => Err(invalid()),
        }
    }
}

/// Normalizes a promo code for storage and lookup.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// A discount rule redeemable at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoCode {
    /// Uppercase code, unique.
    pub code: String,
    pub rule: DiscountRule,
    /// Smallest subtotal the code applies to.
    pub min_amount: Money,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl PromoCode {
    /// Creates an active promo code.
    pub fn new(code: &str, rule: DiscountRule, min_amount: Money) -> Result<Self> {
        let code = normalize_code(code);
        if code.is_empty() {
            return Err(StoreError::InvalidRecord(
                "promo code must not be blank".to_string(),
            ));
        }
        if min_amount.is_negative() {
            return Err(StoreError::InvalidRecord(format!(
                "promo {code} has a negative minimum amount"
            )));
        }
        // Round-trip through the column form to reject non-positive values.
        let rule = DiscountRule::from_columns(rule.kind(), rule.value_hundredths())?;
        Ok(Self {
            code,
            rule,
            min_amount,
            active: true,
            created_at: Utc::now(),
        })
    }

    pub fn deactivated(mut self) -> Self {
        self.active = false;
        self
    }
}
