//! # Filter Engine
//!
//! Optional constraints over the advertisement collection, ANDed together.
//! Repositories evaluate a filter with a linear scan in collection order.

use uuid::Uuid;

use crate::models::{AdKind, Advertisement, AdvertisementType};

/// An absent field places no constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvertisementFilter {
    pub advertisement_type: Option<AdvertisementType>,
    pub category_id: Option<Uuid>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl AdvertisementFilter {
    /// Whether `ad` satisfies every present constraint.
    ///
    /// Price bounds only ever match priced variants: an exchange listing is
    /// excluded by any price bound, never included by default.
    pub fn matches(&self, ad: &Advertisement) -> bool {
        if let Some(wanted) = self.advertisement_type {
            if ad.advertisement_type() != wanted {
                return false;
            }
        }

        if let Some(category_id) = self.category_id {
            if ad.category_id != category_id {
                return false;
            }
        }

        if self.min_price.is_none() && self.max_price.is_none() {
            return true;
        }

        match ad.kind() {
            AdKind::Selling { price } | AdKind::Buying { price } => {
                self.min_price.is_none_or(|min| *price >= min)
                    && self.max_price.is_none_or(|max| *price <= max)
            }
            AdKind::Exchange => false,
        }
    }
}
