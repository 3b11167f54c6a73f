//! Response DTOs
//!
//! Data structures for API response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Certificate, Role, Tag, User, UserOrder};

/// Tag response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
}

impl TagResponse {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

/// Full certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: i32,
    pub duration: i32,
    pub create_date: DateTime<Utc>,
    pub last_update_date: DateTime<Utc>,
    pub tags: Vec<TagResponse>,
}

impl From<Certificate> for CertificateResponse {
    fn from(certificate: Certificate) -> Self {
        Self {
            id: certificate.id,
            name: certificate.name,
            description: certificate.description,
            price: certificate.price,
            duration: certificate.duration,
            create_date: certificate.create_date,
            last_update_date: certificate.last_update_date,
            tags: certificate.tags.into_iter().map(TagResponse::from).collect(),
        }
    }
}

/// Certificate summary used in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateItem {
    pub id: i64,
    pub name: String,
    pub price: i32,
    pub tags: Vec<TagResponse>,
}

impl From<Certificate> for CertificateItem {
    fn from(certificate: Certificate) -> Self {
        Self {
            id: certificate.id,
            name: certificate.name,
            price: certificate.price,
            tags: certificate.tags.into_iter().map(TagResponse::from).collect(),
        }
    }
}

/// User response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Full order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOrderResponse {
    pub id: i64,
    pub user_id: i64,
    pub certificate_id: i64,
    pub cost: i32,
    pub purchase_date: DateTime<Utc>,
}

impl From<UserOrder> for UserOrderResponse {
    fn from(order: UserOrder) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            certificate_id: order.certificate_id,
            cost: order.cost,
            purchase_date: order.purchase_date,
        }
    }
}

/// Order summary used in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOrderItem {
    pub id: i64,
    pub user_id: i64,
    pub certificate_id: i64,
    pub cost: i32,
    pub purchase_date: DateTime<Utc>,
}

impl From<UserOrder> for UserOrderItem {
    fn from(order: UserOrder) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            certificate_id: order.certificate_id,
            cost: order.cost,
            purchase_date: order.purchase_date,
        }
    }
}

/// Authentication tokens response
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

/// Registration response (includes user and tokens)
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub user: UserResponse,
    #[serde(flatten)]
    pub token: TokenResponse,
}
