//! Endpoint Address Book: every backend URL the client calls.
//!
//! URLs are the API root followed by a fixed path. Ids are interpolated
//! verbatim with `Display`; nothing checks that they are well-formed.

use std::fmt::Display;

/// Read-only map from operation to URL, built once from the API root.
#[derive(Debug, Clone)]
pub struct AddressBook {
    root: String,
}

impl AddressBook {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn auth(&self) -> AuthEndpoints<'_> {
        AuthEndpoints { root: &self.root }
    }

    pub fn admin(&self) -> AdminEndpoints<'_> {
        AdminEndpoints { root: &self.root }
    }
}

/// Login, logout, and the signed-in admin's own account.
#[derive(Debug, Clone, Copy)]
pub struct AuthEndpoints<'a> {
    root: &'a str,
}

impl AuthEndpoints<'_> {
    pub fn login(&self) -> String {
        format!("{}/api/auth/login", self.root)
    }

    pub fn logout(&self) -> String {
        format!("{}/api/auth/logout", self.root)
    }

    pub fn profile(&self) -> String {
        format!("{}/api/auth/profile", self.root)
    }

    pub fn change_password(&self) -> String {
        format!("{}/api/auth/change-password", self.root)
    }
}

/// Collection and member URLs for one admin resource.
#[derive(Debug, Clone, Copy)]
pub struct ResourceUrls<'a> {
    root: &'a str,
    path: &'static str,
}

impl ResourceUrls<'_> {
    /// List and create.
    pub fn collection(&self) -> String {
        format!("{}/api/admin/{}", self.root, self.path)
    }

    /// Show, update, and delete.
    pub fn member(&self, id: impl Display) -> String {
        format!("{}/api/admin/{}/{id}", self.root, self.path)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AdminEndpoints<'a> {
    root: &'a str,
}

impl<'a> AdminEndpoints<'a> {
    fn resource(&self, path: &'static str) -> ResourceUrls<'a> {
        ResourceUrls {
            root: self.root,
            path,
        }
    }

    pub fn dashboard(&self) -> String {
        format!("{}/api/admin/dashboard", self.root)
    }

    pub fn users(&self) -> ResourceUrls<'a> {
        self.resource("users")
    }

    pub fn user_loans(&self, user_id: impl Display) -> String {
        format!("{}/api/admin/users/{user_id}/loans", self.root)
    }

    pub fn loans(&self) -> ResourceUrls<'a> {
        self.resource("loans")
    }

    pub fn loan_status(&self, loan_id: impl Display) -> String {
        format!("{}/api/admin/loans/{loan_id}/status", self.root)
    }

    pub fn shops(&self) -> ResourceUrls<'a> {
        self.resource("shops")
    }

    pub fn products(&self) -> ResourceUrls<'a> {
        self.resource("products")
    }

    pub fn bundles(&self) -> ResourceUrls<'a> {
        self.resource("bundles")
    }

    pub fn bundle_products(&self, bundle_id: impl Display) -> String {
        format!("{}/api/admin/bundles/{bundle_id}/products", self.root)
    }

    pub fn tickets(&self) -> ResourceUrls<'a> {
        self.resource("tickets")
    }

    pub fn ticket_replies(&self, ticket_id: impl Display) -> String {
        format!("{}/api/admin/tickets/{ticket_id}/replies", self.root)
    }

    pub fn ticket_close(&self, ticket_id: impl Display) -> String {
        format!("{}/api/admin/tickets/{ticket_id}/close", self.root)
    }

    pub fn notifications(&self) -> ResourceUrls<'a> {
        self.resource("notifications")
    }

    pub fn banners(&self) -> ResourceUrls<'a> {
        self.resource("banners")
    }

    pub fn categories(&self) -> ResourceUrls<'a> {
        self.resource("categories")
    }

    pub fn category_brands(&self, category_id: impl Display) -> String {
        format!("{}/api/admin/categories/{category_id}/brands", self.root)
    }

    pub fn brands(&self) -> ResourceUrls<'a> {
        self.resource("brands")
    }

    pub fn partners(&self) -> ResourceUrls<'a> {
        self.resource("partners")
    }

    pub fn materials(&self) -> ResourceUrls<'a> {
        self.resource("materials")
    }
}
