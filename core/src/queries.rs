//! Read operations. Every method is one authenticated GET whose body is
//! returned untouched.

use std::fmt::Display;

use serde_json::Value;

use crate::client::AdminApi;
use crate::error::Error;
use crate::transport::Transport;

impl<T: Transport> AdminApi<T> {
    pub fn dashboard(&self, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().dashboard(), token)
    }

    pub fn profile(&self, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().auth().profile(), token)
    }

    // users

    pub fn list_users(&self, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().users().collection(), token)
    }

    pub fn show_user(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().users().member(id), token)
    }

    pub fn user_loans(&self, user_id: impl Display, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().user_loans(user_id), token)
    }

    // loans

    pub fn list_loans(&self, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().loans().collection(), token)
    }

    pub fn show_loan(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().loans().member(id), token)
    }

    // catalog

    pub fn list_shops(&self, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().shops().collection(), token)
    }

    pub fn show_shop(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().shops().member(id), token)
    }

    pub fn list_products(&self, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().products().collection(), token)
    }

    pub fn show_product(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().products().member(id), token)
    }

    pub fn list_bundles(&self, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().bundles().collection(), token)
    }

    pub fn show_bundle(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().bundles().member(id), token)
    }

    pub fn bundle_products(&self, bundle_id: impl Display, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().bundle_products(bundle_id), token)
    }

    // support

    pub fn list_tickets(&self, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().tickets().collection(), token)
    }

    pub fn show_ticket(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().tickets().member(id), token)
    }

    pub fn list_notifications(&self, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().notifications().collection(), token)
    }

    pub fn show_notification(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().notifications().member(id), token)
    }

    pub fn list_banners(&self, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().banners().collection(), token)
    }

    pub fn show_banner(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().banners().member(id), token)
    }

    // settings

    pub fn list_categories(&self, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().categories().collection(), token)
    }

    pub fn show_category(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().categories().member(id), token)
    }

    pub fn category_brands(&self, category_id: impl Display, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().category_brands(category_id), token)
    }

    pub fn list_brands(&self, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().brands().collection(), token)
    }

    pub fn show_brand(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().brands().member(id), token)
    }

    pub fn list_partners(&self, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().partners().collection(), token)
    }

    pub fn show_partner(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().partners().member(id), token)
    }

    pub fn list_materials(&self, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().materials().collection(), token)
    }

    pub fn show_material(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.get(self.endpoints().admin().materials().member(id), token)
    }
}
