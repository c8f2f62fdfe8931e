//! Request DTOs for the admin API's write operations.
//!
//! # Design
//! Response bodies are not modelled here: apart from login, the client
//! passes them through as `serde_json::Value`. Inputs that carry a file are
//! turned into a `MultipartForm`; everything else is sent as JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::payload::{FileAttachment, MultipartForm};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response. The rest of the body (user record, expiry) is kept as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePassword {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

/// Partial user update; omitted fields stay unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
    Disbursed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanStatusUpdate {
    pub status: LoanStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Product create/update, sent as a multipart form because of the image.
#[derive(Debug, Clone)]
pub struct ProductUpload {
    pub name: String,
    pub price: f64,
    pub category_id: u64,
    pub brand_id: Option<u64>,
    pub description: Option<String>,
    pub image: Option<FileAttachment>,
}

impl ProductUpload {
    pub fn into_form(self) -> MultipartForm {
        MultipartForm::new()
            .text("name", self.name)
            .text("price", self.price.to_string())
            .text("category_id", self.category_id.to_string())
            .text_opt("brand_id", self.brand_id.map(|id| id.to_string()))
            .text_opt("description", self.description)
            .file_opt("image", self.image)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleInput {
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub product_ids: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketReply {
    pub message: String,
}

/// A notification; `user_id: None` broadcasts to every user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationInput {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct BannerUpload {
    pub title: String,
    pub link: Option<String>,
    pub image: Option<FileAttachment>,
}

impl BannerUpload {
    pub fn into_form(self) -> MultipartForm {
        MultipartForm::new()
            .text("title", self.title)
            .text_opt("link", self.link)
            .file_opt("image", self.image)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandInput {
    pub name: String,
    pub category_id: u64,
}

/// Financing partner, sent as a multipart form because of the logo.
#[derive(Debug, Clone)]
pub struct PartnerUpload {
    pub name: String,
    pub interest_rate: Option<f64>,
    pub logo: Option<FileAttachment>,
}

impl PartnerUpload {
    pub fn into_form(self) -> MultipartForm {
        MultipartForm::new()
            .text("name", self.name)
            .text_opt("interest_rate", self.interest_rate.map(|r| r.to_string()))
            .file_opt("logo", self.logo)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_update_skips_unset_fields() {
        let update = UserUpdate {
            is_active: Some(false),
            ..UserUpdate::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"is_active": false}));
    }

    #[test]
    fn loan_status_is_lowercase() {
        let update = LoanStatusUpdate {
            status: LoanStatus::Approved,
            note: None,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["status"], "approved");
    }

    #[test]
    fn login_response_accepts_access_token_alias() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"access_token":"abc","user":{"id":1}}"#).unwrap();
        assert_eq!(resp.token, "abc");
        assert_eq!(resp.user.unwrap()["id"], 1);
    }

    #[test]
    fn product_form_skips_missing_optionals() {
        let form = ProductUpload {
            name: "Inverter 5kW".to_string(),
            price: 1250.5,
            category_id: 3,
            brand_id: None,
            description: None,
            image: None,
        }
        .into_form();
        assert_eq!(form.len(), 3);
        let body = String::from_utf8(form.encode()).unwrap();
        assert!(body.contains("name=\"price\"\r\n\r\n1250.5\r\n"));
    }

    #[test]
    fn banner_form_includes_image() {
        let form = BannerUpload {
            title: "Promo".to_string(),
            link: Some("https://shop.example/promo".to_string()),
            image: Some(FileAttachment::new("promo.jpg", "image/jpeg", vec![0xff, 0xd8])),
        }
        .into_form();
        assert_eq!(form.len(), 3);
    }
}
