//! Write operations. JSON inputs go out as `application/json`; inputs that
//! carry files go out as multipart forms.

use std::fmt::Display;

use serde_json::Value;

use crate::client::AdminApi;
use crate::error::Error;
use crate::http::HttpMethod;
use crate::payload::Payload;
use crate::transport::Transport;
use crate::types::{
    BannerUpload, BrandInput, BundleInput, CategoryInput, ChangePassword, LoanStatusUpdate,
    LoginRequest, LoginResponse, MaterialInput, NotificationInput, PartnerUpload, ProductUpload,
    ShopUpdate, TicketReply, UserUpdate,
};

impl<T: Transport> AdminApi<T> {
    /// Exchange credentials for a bearer token. Sent without a token; storing
    /// the result is up to the caller.
    pub fn login(&self, input: &LoginRequest) -> Result<LoginResponse, Error> {
        let payload = Payload::json(input)?;
        self.executor().execute_as(
            &self.endpoints().auth().login(),
            HttpMethod::Post,
            Some(&payload),
            None,
        )
    }

    pub fn logout(&self, token: &str) -> Result<Value, Error> {
        self.executor().execute(
            &self.endpoints().auth().logout(),
            HttpMethod::Post,
            None,
            Some(token),
        )
    }

    pub fn change_password(&self, input: &ChangePassword, token: &str) -> Result<Value, Error> {
        self.send_json(
            HttpMethod::Post,
            self.endpoints().auth().change_password(),
            input,
            Some(token),
        )
    }

    // users and loans

    pub fn update_user(
        &self,
        id: impl Display,
        input: &UserUpdate,
        token: &str,
    ) -> Result<Value, Error> {
        self.send_json(
            HttpMethod::Put,
            self.endpoints().admin().users().member(id),
            input,
            Some(token),
        )
    }

    pub fn delete_user(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.delete(self.endpoints().admin().users().member(id), token)
    }

    pub fn update_loan_status(
        &self,
        id: impl Display,
        input: &LoanStatusUpdate,
        token: &str,
    ) -> Result<Value, Error> {
        self.send_json(
            HttpMethod::Put,
            self.endpoints().admin().loan_status(id),
            input,
            Some(token),
        )
    }

    // shops, products, bundles

    pub fn update_shop(
        &self,
        id: impl Display,
        input: &ShopUpdate,
        token: &str,
    ) -> Result<Value, Error> {
        self.send_json(
            HttpMethod::Put,
            self.endpoints().admin().shops().member(id),
            input,
            Some(token),
        )
    }

    pub fn delete_shop(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.delete(self.endpoints().admin().shops().member(id), token)
    }

    pub fn create_product(&self, input: ProductUpload, token: &str) -> Result<Value, Error> {
        self.send_form(
            HttpMethod::Post,
            self.endpoints().admin().products().collection(),
            input.into_form(),
            token,
        )
    }

    pub fn update_product(
        &self,
        id: impl Display,
        input: ProductUpload,
        token: &str,
    ) -> Result<Value, Error> {
        self.send_form(
            HttpMethod::Put,
            self.endpoints().admin().products().member(id),
            input.into_form(),
            token,
        )
    }

    pub fn delete_product(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.delete(self.endpoints().admin().products().member(id), token)
    }

    pub fn create_bundle(&self, input: &BundleInput, token: &str) -> Result<Value, Error> {
        self.send_json(
            HttpMethod::Post,
            self.endpoints().admin().bundles().collection(),
            input,
            Some(token),
        )
    }

    pub fn update_bundle(
        &self,
        id: impl Display,
        input: &BundleInput,
        token: &str,
    ) -> Result<Value, Error> {
        self.send_json(
            HttpMethod::Put,
            self.endpoints().admin().bundles().member(id),
            input,
            Some(token),
        )
    }

    pub fn delete_bundle(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.delete(self.endpoints().admin().bundles().member(id), token)
    }

    // tickets and notifications

    pub fn reply_ticket(
        &self,
        id: impl Display,
        input: &TicketReply,
        token: &str,
    ) -> Result<Value, Error> {
        self.send_json(
            HttpMethod::Post,
            self.endpoints().admin().ticket_replies(id),
            input,
            Some(token),
        )
    }

    pub fn close_ticket(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.executor().execute(
            &self.endpoints().admin().ticket_close(id),
            HttpMethod::Put,
            None,
            Some(token),
        )
    }

    pub fn create_notification(
        &self,
        input: &NotificationInput,
        token: &str,
    ) -> Result<Value, Error> {
        self.send_json(
            HttpMethod::Post,
            self.endpoints().admin().notifications().collection(),
            input,
            Some(token),
        )
    }

    pub fn delete_notification(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.delete(self.endpoints().admin().notifications().member(id), token)
    }

    // banners

    pub fn create_banner(&self, input: BannerUpload, token: &str) -> Result<Value, Error> {
        self.send_form(
            HttpMethod::Post,
            self.endpoints().admin().banners().collection(),
            input.into_form(),
            token,
        )
    }

    pub fn update_banner(
        &self,
        id: impl Display,
        input: BannerUpload,
        token: &str,
    ) -> Result<Value, Error> {
        self.send_form(
            HttpMethod::Put,
            self.endpoints().admin().banners().member(id),
            input.into_form(),
            token,
        )
    }

    pub fn delete_banner(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.delete(self.endpoints().admin().banners().member(id), token)
    }

    // settings

    pub fn create_category(&self, input: &CategoryInput, token: &str) -> Result<Value, Error> {
        self.send_json(
            HttpMethod::Post,
            self.endpoints().admin().categories().collection(),
            input,
            Some(token),
        )
    }

    pub fn update_category(
        &self,
        id: impl Display,
        input: &CategoryInput,
        token: &str,
    ) -> Result<Value, Error> {
        self.send_json(
            HttpMethod::Put,
            self.endpoints().admin().categories().member(id),
            input,
            Some(token),
        )
    }

    pub fn delete_category(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.delete(self.endpoints().admin().categories().member(id), token)
    }

    pub fn create_brand(&self, input: &BrandInput, token: &str) -> Result<Value, Error> {
        self.send_json(
            HttpMethod::Post,
            self.endpoints().admin().brands().collection(),
            input,
            Some(token),
        )
    }

    pub fn update_brand(
        &self,
        id: impl Display,
        input: &BrandInput,
        token: &str,
    ) -> Result<Value, Error> {
        self.send_json(
            HttpMethod::Put,
            self.endpoints().admin().brands().member(id),
            input,
            Some(token),
        )
    }

    pub fn delete_brand(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.delete(self.endpoints().admin().brands().member(id), token)
    }

    pub fn create_partner(&self, input: PartnerUpload, token: &str) -> Result<Value, Error> {
        self.send_form(
            HttpMethod::Post,
            self.endpoints().admin().partners().collection(),
            input.into_form(),
            token,
        )
    }

    pub fn update_partner(
        &self,
        id: impl Display,
        input: PartnerUpload,
        token: &str,
    ) -> Result<Value, Error> {
        self.send_form(
            HttpMethod::Put,
            self.endpoints().admin().partners().member(id),
            input.into_form(),
            token,
        )
    }

    pub fn delete_partner(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.delete(self.endpoints().admin().partners().member(id), token)
    }

    pub fn create_material(&self, input: &MaterialInput, token: &str) -> Result<Value, Error> {
        self.send_json(
            HttpMethod::Post,
            self.endpoints().admin().materials().collection(),
            input,
            Some(token),
        )
    }

    pub fn update_material(
        &self,
        id: impl Display,
        input: &MaterialInput,
        token: &str,
    ) -> Result<Value, Error> {
        self.send_json(
            HttpMethod::Put,
            self.endpoints().admin().materials().member(id),
            input,
            Some(token),
        )
    }

    pub fn delete_material(&self, id: impl Display, token: &str) -> Result<Value, Error> {
        self.delete(self.endpoints().admin().materials().member(id), token)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::endpoints::AddressBook;
    use crate::executor::tests::ScriptedTransport;
    use crate::executor::RequestExecutor;
    use crate::payload::FileAttachment;

    fn api(transport: ScriptedTransport) -> AdminApi<ScriptedTransport> {
        AdminApi::new(AddressBook::new("https://api.example"), RequestExecutor::new(transport))
    }

    #[test]
    fn login_sends_credentials_without_token() {
        let api = api(ScriptedTransport::replying(200, r#"{"token":"abc","user":{"id":1}}"#));
        let resp = api
            .login(&LoginRequest {
                email: "admin@solar.example".to_string(),
                password: "secret".to_string(),
            })
            .unwrap();
        assert_eq!(resp.token, "abc");

        let sent = api.executor().transport().last();
        assert_eq!(sent.url, "https://api.example/api/auth/login");
        assert_eq!(sent.header("authorization"), Some("Bearer "));
        let body: Value = serde_json::from_slice(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"email": "admin@solar.example", "password": "secret"}));
    }

    #[test]
    fn login_without_token_field_is_a_decode_error() {
        let api = api(ScriptedTransport::replying(200, r#"{"ok":true}"#));
        let err = api
            .login(&LoginRequest {
                email: "a".to_string(),
                password: "b".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn create_category_posts_json() {
        let api = api(ScriptedTransport::echo());
        let value = api
            .create_category(&CategoryInput { name: "Inverters".to_string() }, "tok")
            .unwrap();
        assert_eq!(value, json!({"name": "Inverters"}));

        let sent = api.executor().transport().last();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url, "https://api.example/api/admin/categories");
        assert_eq!(sent.header("content-type"), Some("application/json"));
    }

    #[test]
    fn create_product_posts_multipart() {
        let api = api(ScriptedTransport::replying(201, r#"{"id":10}"#));
        api.create_product(
            ProductUpload {
                name: "Panel 400W".to_string(),
                price: 199.0,
                category_id: 2,
                brand_id: Some(4),
                description: None,
                image: Some(FileAttachment::new("panel.png", "image/png", vec![1, 2])),
            },
            "tok",
        )
        .unwrap();

        let sent = api.executor().transport().last();
        let content_type = sent.header("content-type").unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
        let body = String::from_utf8_lossy(sent.body.as_deref().unwrap()).into_owned();
        assert!(body.contains("filename=\"panel.png\""));
        assert!(body.contains("name=\"brand_id\"\r\n\r\n4\r\n"));
    }

    #[test]
    fn update_loan_status_puts_to_status_url() {
        let api = api(ScriptedTransport::replying(200, r#"{"status":"approved"}"#));
        api.update_loan_status(
            12,
            &LoanStatusUpdate {
                status: crate::types::LoanStatus::Approved,
                note: Some("docs verified".to_string()),
            },
            "tok",
        )
        .unwrap();
        let sent = api.executor().transport().last();
        assert_eq!(sent.method, HttpMethod::Put);
        assert_eq!(sent.url, "https://api.example/api/admin/loans/12/status");
    }

    #[test]
    fn delete_banner_resolves_on_no_content() {
        let api = api(ScriptedTransport::replying(204, ""));
        let value = api.delete_banner(3, "tok123").unwrap();
        assert_eq!(value, Value::Null);
        let sent = api.executor().transport().last();
        assert_eq!(sent.method, HttpMethod::Delete);
        assert_eq!(sent.header("authorization"), Some("Bearer tok123"));
    }

    #[test]
    fn validation_errors_surface_server_message() {
        let api = api(ScriptedTransport::replying(
            422,
            r#"{"message":"The name has already been taken."}"#,
        ));
        let err = api
            .create_brand(&BrandInput { name: "Jinko".to_string(), category_id: 1 }, "tok")
            .unwrap_err();
        let api_err = err.api().unwrap();
        assert_eq!(api_err.status_code, Some(422));
        assert_eq!(api_err.message, "The name has already been taken.");
    }
}
