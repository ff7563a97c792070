//! Input payloads for the service layer.

use uuid::Uuid;

use crate::models::AdvertisementType;

/// Everything needed to register a guest as an account.
#[derive(Debug, Clone)]
pub struct RegisterUserDto {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Everything needed to create a listing. `price` is ignored for exchange
/// listings.
#[derive(Debug, Clone)]
pub struct CreateAdvertisementDto {
    pub title: String,
    pub description: String,
    pub category_id: Uuid,
    pub advertisement_type: AdvertisementType,
    pub price: f64,
    pub photo_paths: Vec<String>,
}
