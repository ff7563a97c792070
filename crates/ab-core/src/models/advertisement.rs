//! The advertisement aggregate: one struct for the shared fields, a tagged
//! union for the variant-specific ones.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

use crate::error::{AppError, Result};

/// Longest accepted description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Minimum age (and minimum gap between promotions) before `promote` succeeds.
const PROMOTE_COOLDOWN_HOURS: i64 = 24;

/// Which kind of listing an advertisement is.
///
/// Doubles as the wire discriminator (`"Type"` in persisted snapshots) and as
/// the type dimension of [`crate::filter::AdvertisementFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvertisementType {
    Selling,
    Buying,
    Exchange,
}

/// Variant payload of an advertisement. Only priced variants carry a price.
#[derive(Debug, Clone, PartialEq)]
pub enum AdKind {
    Selling { price: f64 },
    Buying { price: f64 },
    Exchange,
}

impl AdKind {
    /// The discriminator for this payload.
    pub fn advertisement_type(&self) -> AdvertisementType {
        match self {
            AdKind::Selling { .. } => AdvertisementType::Selling,
            AdKind::Buying { .. } => AdvertisementType::Buying,
            AdKind::Exchange => AdvertisementType::Exchange,
        }
    }
}

/// A classified listing. Created unpublished; `created_at` is re-based by
/// `promote`, so it reads as "created or last promoted at".
#[derive(Debug, Clone, PartialEq)]
pub struct Advertisement {
    id: Uuid,
    title: String,
    description: String,
    pub category_id: Uuid,
    pub owner_id: Uuid,
    created_at: DateTime<Utc>,
    published: bool,
    pub photo_paths: Vec<String>,
    kind: AdKind,
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation(
            "title cannot be empty or whitespace".into(),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(AppError::Validation(
            "description cannot be empty or whitespace".into(),
        ));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(AppError::Validation(format!(
            "description cannot exceed {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation("price cannot be negative".into()));
    }
    Ok(())
}

fn validate_kind(kind: &AdKind) -> Result<()> {
    match kind {
        AdKind::Selling { price } | AdKind::Buying { price } => validate_price(*price),
        AdKind::Exchange => Ok(()),
    }
}

impl Advertisement {
    fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category_id: Uuid,
        owner_id: Uuid,
        kind: AdKind,
    ) -> Result<Self> {
        let title = title.into();
        let description = description.into();
        validate_title(&title)?;
        validate_description(&description)?;
        validate_kind(&kind)?;

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            description,
            category_id,
            owner_id,
            created_at: Utc::now(),
            published: false,
            photo_paths: Vec::new(),
            kind,
        })
    }

    /// Creates a selling listing. Fails fast on an invalid title, description
    /// or price.
    pub fn selling(
        title: impl Into<String>,
        description: impl Into<String>,
        category_id: Uuid,
        owner_id: Uuid,
        price: f64,
    ) -> Result<Self> {
        Self::new(title, description, category_id, owner_id, AdKind::Selling { price })
    }

    /// Creates a buying listing.
    pub fn buying(
        title: impl Into<String>,
        description: impl Into<String>,
        category_id: Uuid,
        owner_id: Uuid,
        price: f64,
    ) -> Result<Self> {
        Self::new(title, description, category_id, owner_id, AdKind::Buying { price })
    }

    /// Creates an exchange listing. Exchange listings have no price.
    pub fn exchange(
        title: impl Into<String>,
        description: impl Into<String>,
        category_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Self> {
        Self::new(title, description, category_id, owner_id, AdKind::Exchange)
    }

    /// Rebuilds a listing from persisted state, re-running the field
    /// validation. A stored record that no longer satisfies the invariants is
    /// treated as corrupt by the caller.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: Uuid,
        title: String,
        description: String,
        category_id: Uuid,
        owner_id: Uuid,
        created_at: DateTime<Utc>,
        published: bool,
        photo_paths: Vec<String>,
        kind: AdKind,
    ) -> Result<Self> {
        validate_title(&title)?;
        validate_description(&description)?;
        validate_kind(&kind)?;

        Ok(Self {
            id,
            title,
            description,
            category_id,
            owner_id,
            created_at,
            published,
            photo_paths,
            kind,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        validate_title(&title)?;
        self.title = title;
        Ok(())
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
        let description = description.into();
        validate_description(&description)?;
        self.description = description;
        Ok(())
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    pub fn kind(&self) -> &AdKind {
        &self.kind
    }

    pub fn advertisement_type(&self) -> AdvertisementType {
        self.kind.advertisement_type()
    }

    /// The asking/offered price, absent for exchange listings.
    pub fn price(&self) -> Option<f64> {
        match self.kind {
            AdKind::Selling { price } | AdKind::Buying { price } => Some(price),
            AdKind::Exchange => None,
        }
    }

    /// Replaces the price on a priced listing.
    pub fn set_price(&mut self, price: f64) -> Result<()> {
        validate_price(price)?;
        match &mut self.kind {
            AdKind::Selling { price: p } | AdKind::Buying { price: p } => {
                *p = price;
                Ok(())
            }
            AdKind::Exchange => Err(AppError::Validation(
                "exchange listings have no price".into(),
            )),
        }
    }

    /// Makes the listing visible. Refuses (returns `false`) when `created_at`
    /// sits in the future, which guards against clock skew and ill-formed
    /// records. Publishing an already published listing succeeds again.
    pub fn publish_at(&mut self, now: DateTime<Utc>) -> bool {
        if self.created_at > now {
            return false;
        }
        self.published = true;
        true
    }

    pub fn publish(&mut self) -> bool {
        self.publish_at(Utc::now())
    }

    /// Hides the listing. Returns `false` when it was not published.
    pub fn unpublish(&mut self) -> bool {
        if !self.published {
            return false;
        }
        self.published = false;
        true
    }

    /// Bumps the listing to the top by re-basing `created_at`, at most once
    /// per 24 hours. The creation and promotion clocks are deliberately the
    /// same field.
    pub fn promote_at(&mut self, now: DateTime<Utc>) -> bool {
        if now.signed_duration_since(self.created_at) < Duration::hours(PROMOTE_COOLDOWN_HOURS) {
            return false;
        }
        self.created_at = now;
        true
    }

    pub fn promote(&mut self) -> bool {
        self.promote_at(Utc::now())
    }

    /// Overwrites the caller-editable fields from `other`, preserving id,
    /// creation time, publication state and variant payload.
    pub fn apply_update(&mut self, other: &Advertisement) {
        self.title = other.title.clone();
        self.description = other.description.clone();
        self.category_id = other.category_id;
        self.owner_id = other.owner_id;
        self.photo_paths = other.photo_paths.clone();
    }

    /// Total order by creation (or last promotion) time, oldest first.
    pub fn cmp_created(&self, other: &Advertisement) -> Ordering {
        self.created_at.cmp(&other.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selling(price: f64) -> Advertisement {
        Advertisement::selling("Bike", "A sturdy city bike", Uuid::new_v4(), Uuid::new_v4(), price)
            .unwrap()
    }

    fn backdated(hours: i64) -> Advertisement {
        let mut ad = selling(100.0);
        ad.created_at = Utc::now() - Duration::hours(hours);
        ad
    }

    #[test]
    fn constructor_rejects_blank_title() {
        let err = Advertisement::selling("  ", "desc", Uuid::new_v4(), Uuid::new_v4(), 10.0);
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn constructor_rejects_overlong_description() {
        let description = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        let err = Advertisement::selling("Bike", description, Uuid::new_v4(), Uuid::new_v4(), 10.0);
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn constructor_rejects_negative_price() {
        let err = Advertisement::buying("Bike", "desc", Uuid::new_v4(), Uuid::new_v4(), -1.0);
        assert!(matches!(err, Err(AppError::Validation(_))));
    }

    #[test]
    fn new_listing_is_unpublished() {
        assert!(!selling(10.0).is_published());
    }

    #[test]
    fn publish_with_past_created_at_succeeds_twice() {
        let mut ad = backdated(1);
        assert!(ad.publish());
        assert!(ad.publish());
        assert!(ad.is_published());
    }

    #[test]
    fn publish_with_future_created_at_is_refused() {
        let mut ad = selling(10.0);
        let earlier = ad.created_at() - Duration::hours(1);
        assert!(!ad.publish_at(earlier));
        assert!(!ad.is_published());
    }

    #[test]
    fn unpublish_requires_published_state() {
        let mut ad = selling(10.0);
        assert!(!ad.unpublish());
        ad.publish();
        assert!(ad.unpublish());
        assert!(!ad.is_published());
    }

    #[test]
    fn promote_is_refused_inside_cooldown() {
        let mut ad = backdated(12);
        let created = ad.created_at();
        assert!(!ad.promote_at(Utc::now()));
        assert_eq!(ad.created_at(), created);
    }

    #[test]
    fn promote_rebases_created_at_after_cooldown() {
        let mut ad = backdated(25);
        let now = Utc::now();
        assert!(ad.promote_at(now));
        assert_eq!(ad.created_at(), now);
        // The cooldown restarts from the promotion time.
        assert!(!ad.promote_at(now + Duration::hours(12)));
    }

    #[test]
    fn exchange_has_no_price() {
        let ad =
            Advertisement::exchange("Stamps", "Trade my stamps", Uuid::new_v4(), Uuid::new_v4())
                .unwrap();
        assert_eq!(ad.price(), None);
        assert_eq!(ad.advertisement_type(), AdvertisementType::Exchange);
    }

    #[test]
    fn set_price_on_exchange_is_refused() {
        let mut ad =
            Advertisement::exchange("Stamps", "Trade my stamps", Uuid::new_v4(), Uuid::new_v4())
                .unwrap();
        assert!(ad.set_price(5.0).is_err());
    }

    #[test]
    fn apply_update_preserves_identity_and_state() {
        let mut ad = selling(10.0);
        ad.publish();
        let id = ad.id();
        let created = ad.created_at();

        let mut other = selling(99.0);
        other.set_title("New title").unwrap();
        other.photo_paths.push("photos/1.jpg".into());
        ad.apply_update(&other);

        assert_eq!(ad.id(), id);
        assert_eq!(ad.created_at(), created);
        assert!(ad.is_published());
        assert_eq!(ad.title(), "New title");
        assert_eq!(ad.photo_paths, vec!["photos/1.jpg".to_string()]);
        // The price is not part of an update.
        assert_eq!(ad.price(), Some(10.0));
    }

    #[test]
    fn cmp_created_orders_oldest_first() {
        let older = backdated(48);
        let newer = selling(10.0);
        assert_eq!(older.cmp_created(&newer), Ordering::Less);
        assert_eq!(newer.cmp_created(&older), Ordering::Greater);
    }
}
