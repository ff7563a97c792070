//! Creating and querying listings. A registered user's advertisement list is
//! a derived view over the advertisement repository, never stored on the
//! account.

use uuid::Uuid;

use ab_core::dto::CreateAdvertisementDto;
use ab_core::error::Result;
use ab_core::filter::AdvertisementFilter;
use ab_core::models::{Advertisement, AdvertisementType};
use ab_core::traits::AdvertisementRepo;

/// Builds the listing variant the DTO asks for, owned by `owner_id`, and
/// registers it. The listing starts unpublished.
pub fn create_advertisement(
    advertisements: &impl AdvertisementRepo,
    owner_id: Uuid,
    dto: &CreateAdvertisementDto,
) -> Result<Advertisement> {
    let mut ad = match dto.advertisement_type {
        AdvertisementType::Selling => Advertisement::selling(
            dto.title.clone(),
            dto.description.clone(),
            dto.category_id,
            owner_id,
            dto.price,
        ),
        AdvertisementType::Buying => Advertisement::buying(
            dto.title.clone(),
            dto.description.clone(),
            dto.category_id,
            owner_id,
            dto.price,
        ),
        AdvertisementType::Exchange => Advertisement::exchange(
            dto.title.clone(),
            dto.description.clone(),
            dto.category_id,
            owner_id,
        ),
    }?;
    ad.photo_paths = dto.photo_paths.clone();

    advertisements.add(ad.clone())?;
    Ok(ad)
}

/// The browse operation available to guests and accounts alike.
pub fn browse(
    advertisements: &impl AdvertisementRepo,
    filter: &AdvertisementFilter,
) -> Vec<Advertisement> {
    advertisements.find_by_filters(filter)
}

/// Derived view: everything `user_id` currently has listed.
pub fn advertisements_owned_by(
    advertisements: &impl AdvertisementRepo,
    user_id: Uuid,
) -> Vec<Advertisement> {
    advertisements.get_by_user_id(user_id)
}
