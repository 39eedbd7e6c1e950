/*
 * Trustpilot Invitations - A client for the Trustpilot invitation API
 * Copyright (C) 2025 Josh Kropf <josh@slashdev.ca>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use chrono::{DateTime, FixedOffset, Local, SecondsFormat};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::Level;
use url::Url;

use crate::api_client::{HttpMethod, HttpRequest, ReqwestTransport, Transport};
use crate::access_token::TokenProvider;
use crate::config::{ClientConfig, Endpoint};
use crate::error::{InvitationError, TransportError};
use crate::invitation::{InvitationContext, Recipient, Sender};
use crate::json::{Consumer, InvitationLinkRequest, InvitationRequest, ProductSelection};
use crate::logger::{Logger, NoopLogger};
use crate::product_review::{Product, ProductReviewInvitationContext, ProductReviewsQuery};

const TOKEN_PARAM: &str = "token";

/// Client for the Trustpilot invitation and product review APIs.
///
/// Every call sends exactly one request with the provider's token in the
/// `token` query parameter and returns the decoded JSON response untouched.
pub struct InvitationClient<P, T = ReqwestTransport> {
    token: P,
    config: ClientConfig,
    transport: T,
    logger: Arc<dyn Logger + Send + Sync>
}

impl<P: TokenProvider> InvitationClient<P> {
    pub fn new(token: P) -> Self {
        Self::with_config(token, ClientConfig::default())
    }

    pub fn with_config(token: P, config: ClientConfig) -> Self {
        Self {
            token,
            config,
            transport: ReqwestTransport::new(),
            logger: Arc::new(NoopLogger)
        }
    }
}

impl<P: TokenProvider, T: Transport> InvitationClient<P, T> {
    pub fn with_transport<U: Transport>(self, transport: U) -> InvitationClient<P, U> {
        InvitationClient {
            token: self.token,
            config: self.config,
            transport,
            logger: self.logger
        }
    }

    pub fn with_logger<L>(mut self, logger: L) -> Self
        where L: Logger + Send + Sync + 'static
    {
        self.logger = Arc::new(logger);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Invite a consumer to review the business unit.
    ///
    /// * `time` - Preferred send time, defaults to now
    pub async fn invite(
        &self,
        context: &InvitationContext,
        recipient: &Recipient,
        sender: &Sender,
        reference_id: &str,
        time: Option<DateTime<FixedOffset>>
    ) -> Result<Value, InvitationError> {
        let time = time.unwrap_or_else(|| Local::now().into());

        let body = InvitationRequest {
            recipient_email: recipient.email(),
            recipient_name: recipient.name(),
            reference_id,
            template_id: context.template_id(),
            locale: context.locale(),
            sender_name: sender.name(),
            sender_email: sender.email(),
            reply_to: sender.reply_email(),
            preferred_send_time: time.to_rfc3339_opts(SecondsFormat::Secs, false),
            tags: context.tags(),
            redirect_uri: context.redirect_uri()
        };

        let url = self.config.url(Endpoint::Invitations, &[
            "private", "business-units", context.business_unit_id(), "invitations"
        ]);

        self.post(url, &body).await
    }

    /// Create a product review invitation link.
    ///
    /// `product_ids` are sent when non-empty, otherwise `products` are.
    pub async fn product_review_invitation(
        &self,
        context: &ProductReviewInvitationContext,
        recipient: &Recipient,
        reference_id: &str,
        product_ids: &[String],
        products: &[Product]
    ) -> Result<Value, InvitationError> {
        let body = InvitationLinkRequest {
            reference_id,
            locale: context.locale(),
            consumer: Consumer {
                email: recipient.email(),
                name: recipient.name()
            },
            redirect_uri: context.redirect_uri(),
            selection: ProductSelection::choose(product_ids, products)
        };

        let url = self.config.url(Endpoint::Api, &[
            "private", "product-reviews", "business-units", context.business_unit_id(), "invitation-links"
        ]);

        self.post(url, &body).await
    }

    pub async fn get_product_reviews<S: AsRef<str>>(
        &self,
        business_unit_id: &str,
        skus: &[S],
        query: &ProductReviewsQuery
    ) -> Result<Value, InvitationError> {
        self.require_business_unit_id(business_unit_id, "get_product_reviews")?;

        let sku = skus.iter()
            .map(|s| s.as_ref())
            .collect::<Vec<&str>>()
            .join(",");

        let params = vec![
            ("page".to_string(), query.page.to_string()),
            ("perPage".to_string(), query.per_page.to_string()),
            ("sku".to_string(), sku),
            ("language".to_string(), query.language.clone())
        ];

        let url = self.config.url(Endpoint::Api, &[
            "product-reviews", "business-units", business_unit_id, "reviews"
        ]);

        self.make_request(url, params, None).await
    }

    pub async fn get_invitation_templates(&self, business_unit_id: &str) -> Result<Value, InvitationError> {
        self.require_business_unit_id(business_unit_id, "get_invitation_templates")?;

        let url = self.config.url(Endpoint::Invitations, &[
            "private", "business-units", business_unit_id, "templates"
        ]);

        self.make_request(url, Vec::new(), None).await
    }

    fn require_business_unit_id(&self, business_unit_id: &str, operation: &str) -> Result<(), InvitationError> {
        if business_unit_id.trim().is_empty() {
            let message = format!("Missing business unit id on calling {operation}");
            self.logger.log(Level::ERROR, &message);
            return Err(InvitationError::Validation(message));
        }

        Ok(())
    }

    async fn post<B: Serialize>(&self, url: Url, body: &B) -> Result<Value, InvitationError> {
        let json = serde_json::to_value(body)
            .map_err(TransportError::Encode)?;

        self.make_request(url, Vec::new(), Some(json)).await
    }

    /// POST when there is a body, GET otherwise. The token always leads the query.
    async fn make_request(
        &self,
        url: Url,
        params: Vec<(String, String)>,
        json: Option<Value>
    ) -> Result<Value, InvitationError> {
        let method = if json.is_some() { HttpMethod::Post } else { HttpMethod::Get };

        let mut query = vec![(TOKEN_PARAM.to_string(), self.token.token())];
        query.extend(params);

        let request = HttpRequest { method, url, query, json };

        self.call_endpoint(&request).await
    }

    async fn call_endpoint(&self, request: &HttpRequest) -> Result<Value, InvitationError> {
        let result = match self.transport.send(request).await {
            Ok(body) => decode_body(&body),
            Err(e) => Err(e)
        };

        result.map_err(|e| {
            self.log_failure(request, &e);
            InvitationError::from(e)
        })
    }

    fn log_failure(&self, request: &HttpRequest, error: &TransportError) {
        self.logger.log(Level::ERROR, &format!(
            "Request failed: {error}; method: {method}; url: {url}; options: {options}",
            method = request.method,
            url = request.url,
            options = request_options(request)
        ));
    }
}

fn decode_body(body: &str) -> Result<Value, TransportError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(body).map_err(TransportError::Decode)
}

/// Query and body as sent, with the token masked
fn request_options(request: &HttpRequest) -> Value {
    let query: Map<String, Value> = request.query.iter()
        .map(|(k, v)| {
            let v = if k == TOKEN_PARAM { "***" } else { v.as_str() };
            (k.clone(), Value::from(v))
        })
        .collect();

    let mut options = Map::new();
    options.insert("query".to_string(), Value::Object(query));

    if let Some(json) = &request.json {
        options.insert("json".to_string(), json.clone());
    }

    Value::Object(options)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::sync::Mutex;

    use super::*;

    enum Reply {
        Body(&'static str),
        Status(u16)
    }

    struct RecordingTransport {
        requests: Mutex<Vec<HttpRequest>>,
        reply: Reply
    }

    impl RecordingTransport {
        fn replying(reply: Reply) -> Self {
            Self { requests: Mutex::new(Vec::new()), reply }
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for RecordingTransport {
        async fn send(&self, request: &HttpRequest) -> Result<String, TransportError> {
            self.requests.lock().unwrap().push(request.clone());

            match self.reply {
                Reply::Body(body) => Ok(body.to_string()),
                Reply::Status(status) => Err(TransportError::Status {
                    status,
                    body: "nope".to_string()
                })
            }
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        entries: Mutex<Vec<(Level, String)>>
    }

    impl RecordingLogger {
        fn entries(&self) -> Vec<(Level, String)> {
            self.entries.lock().unwrap().clone()
        }
    }

    impl Logger for RecordingLogger {
        fn log(&self, level: Level, message: &str) {
            self.entries.lock().unwrap().push((level, message.to_string()));
        }
    }

    fn client(reply: Reply) -> InvitationClient<&'static str, RecordingTransport> {
        InvitationClient::new("secret-token")
            .with_transport(RecordingTransport::replying(reply))
    }

    fn query_value<'a>(request: &'a HttpRequest, key: &str) -> Option<&'a str> {
        request.query.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn invitation_context() -> InvitationContext {
        InvitationContext::new("bu-1", "tpl-1", "https://shop.example.com/thanks")
            .with_tags(["summer", "vip"])
    }

    #[tokio::test]
    async fn invite_posts_full_body() {
        let client = client(Reply::Body(r#"{"id":"inv-1"}"#));
        let time = FixedOffset::east_opt(3600).unwrap()
            .with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();

        let result = client.invite(
            &invitation_context(),
            &Recipient::new("jane@example.com", "Jane"),
            &Sender::new("shop@example.com", "Shop", "support@example.com"),
            "order-42",
            Some(time)
        ).await.unwrap();

        assert_eq!(result, json!({"id": "inv-1"}));

        let requests = client.transport.requests();
        assert_eq!(requests.len(), 1);

        let request = &requests[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            request.url.as_str(),
            "https://invitations-api.trustpilot.com/v1/private/business-units/bu-1/invitations"
        );
        assert_eq!(request.query, vec![("token".to_string(), "secret-token".to_string())]);
        assert_eq!(request.json, Some(json!({
            "recipientEmail": "jane@example.com",
            "recipientName": "Jane",
            "referenceId": "order-42",
            "templateId": "tpl-1",
            "locale": "en-US",
            "senderName": "Shop",
            "senderEmail": "shop@example.com",
            "replyTo": "support@example.com",
            "preferredSendTime": "2024-03-01T10:00:00+01:00",
            "tags": ["summer", "vip"],
            "redirectUri": "https://shop.example.com/thanks"
        })));
    }

    #[tokio::test]
    async fn invite_defaults_send_time_to_now() {
        let client = client(Reply::Body("{}"));

        client.invite(
            &invitation_context(),
            &Recipient::new("jane@example.com", "Jane"),
            &Sender::new("shop@example.com", "Shop", "support@example.com"),
            "order-42",
            None
        ).await.unwrap();

        let request = &client.transport.requests()[0];
        let body = request.json.as_ref().unwrap();
        assert_eq!(body.as_object().unwrap().len(), 11);

        let sent = DateTime::parse_from_rfc3339(body["preferredSendTime"].as_str().unwrap()).unwrap();
        let drift = Utc::now().signed_duration_since(sent).num_seconds().abs();
        assert!(drift <= 5, "send time {sent} is {drift}s away from now");
    }

    #[tokio::test]
    async fn utc_send_time_uses_numeric_offset() {
        let client = client(Reply::Body("{}"));
        let time: DateTime<FixedOffset> = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap().into();

        client.invite(
            &invitation_context(),
            &Recipient::new("jane@example.com", "Jane"),
            &Sender::new("shop@example.com", "Shop", "support@example.com"),
            "order-42",
            Some(time)
        ).await.unwrap();

        let request = &client.transport.requests()[0];
        assert_eq!(request.json.as_ref().unwrap()["preferredSendTime"], "2024-03-01T10:00:00+00:00");
    }

    #[tokio::test]
    async fn product_review_invitation_with_ids() {
        let client = client(Reply::Body(r#"{"url":"https://link"}"#));
        let context = ProductReviewInvitationContext::new("bu-1", "https://shop.example.com");
        let ids = vec!["p-1".to_string(), "p-2".to_string()];
        let products = vec![Product::new("sku-1", "Shoe", "https://shop/shoe", "https://shop/shoe.png")];

        client.product_review_invitation(
            &context,
            &Recipient::new("jane@example.com", "Jane"),
            "order-42",
            &ids,
            &products
        ).await.unwrap();

        let request = &client.transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(
            request.url.as_str(),
            "https://api.trustpilot.com/v1/private/product-reviews/business-units/bu-1/invitation-links"
        );
        assert_eq!(query_value(request, "token"), Some("secret-token"));
        assert_eq!(request.json, Some(json!({
            "referenceId": "order-42",
            "locale": "en-US",
            "consumer": { "email": "jane@example.com", "name": "Jane" },
            "redirectUri": "https://shop.example.com",
            "productIds": ["p-1", "p-2"]
        })));
    }

    #[tokio::test]
    async fn product_review_invitation_with_products() {
        let client = client(Reply::Body("{}"));
        let context = ProductReviewInvitationContext::new("bu-1", "https://shop.example.com")
            .with_locale("de-DE");
        let products = vec![Product::new("sku-1", "Shoe", "https://shop/shoe", "https://shop/shoe.png")];

        client.product_review_invitation(
            &context,
            &Recipient::new("jane@example.com", "Jane"),
            "order-42",
            &[],
            &products
        ).await.unwrap();

        let body = client.transport.requests()[0].json.clone().unwrap();
        assert_eq!(body["locale"], "de-DE");
        assert_eq!(body["products"][0]["sku"], "sku-1");
        assert!(body.get("productIds").is_none());
    }

    #[tokio::test]
    async fn get_product_reviews_defaults() {
        let client = client(Reply::Body(r#"{"productReviews":[]}"#));

        let result = client.get_product_reviews("bu-1", &["a", "b", "c"], &ProductReviewsQuery::default())
            .await.unwrap();

        assert_eq!(result, json!({"productReviews": []}));

        let request = &client.transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Get);
        assert!(request.json.is_none());
        assert_eq!(
            request.url.as_str(),
            "https://api.trustpilot.com/v1/product-reviews/business-units/bu-1/reviews"
        );
        assert_eq!(request.query, vec![
            ("token".to_string(), "secret-token".to_string()),
            ("page".to_string(), "1".to_string()),
            ("perPage".to_string(), "100".to_string()),
            ("sku".to_string(), "a,b,c".to_string()),
            ("language".to_string(), "de".to_string())
        ]);
    }

    #[tokio::test]
    async fn get_product_reviews_custom_query() {
        let client = client(Reply::Body("{}"));
        let query = ProductReviewsQuery {
            language: "en".to_string(),
            page: 3,
            per_page: 20
        };
        let skus = vec!["z".to_string(), "a".to_string()];

        client.get_product_reviews("bu-1", &skus, &query).await.unwrap();

        let request = &client.transport.requests()[0];
        assert_eq!(query_value(request, "page"), Some("3"));
        assert_eq!(query_value(request, "perPage"), Some("20"));
        assert_eq!(query_value(request, "sku"), Some("z,a"));
        assert_eq!(query_value(request, "language"), Some("en"));
    }

    #[tokio::test]
    async fn get_invitation_templates_issues_one_get() {
        let client = client(Reply::Body(r#"{"templates":[]}"#));

        client.get_invitation_templates("valid-id").await.unwrap();

        let requests = client.transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(
            requests[0].url.as_str(),
            "https://invitations-api.trustpilot.com/v1/private/business-units/valid-id/templates"
        );
        assert_eq!(requests[0].query, vec![("token".to_string(), "secret-token".to_string())]);
    }

    #[tokio::test]
    async fn blank_business_unit_is_rejected_before_sending() {
        let logger = Arc::new(RecordingLogger::default());
        let client = client(Reply::Body("{}")).with_logger(logger.clone());

        for id in ["", "   "] {
            let err = client.get_invitation_templates(id).await.unwrap_err();
            assert!(matches!(err, InvitationError::Validation(_)));
        }

        let err = client.get_product_reviews("", &["a"], &ProductReviewsQuery::default())
            .await.unwrap_err();
        assert!(matches!(err, InvitationError::Validation(_)));

        assert!(client.transport.requests().is_empty());

        let entries = logger.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].0, Level::ERROR);
        assert!(entries[0].1.contains("get_invitation_templates"));
    }

    #[tokio::test]
    async fn transport_failure_is_wrapped_and_logged_once() {
        let logger = Arc::new(RecordingLogger::default());
        let client = client(Reply::Status(503)).with_logger(logger.clone());

        let err = client.get_invitation_templates("bu-1").await.unwrap_err();

        match &err {
            InvitationError::Transport { message, code, source } => {
                assert_eq!(*code, Some(503));
                assert_eq!(message, "server responded with status 503: nope");
                assert!(matches!(source, TransportError::Status { status: 503, .. }));
            },
            other => panic!("unexpected error {other:?}")
        }

        let entries = logger.entries();
        assert_eq!(entries.len(), 1);

        let (level, message) = &entries[0];
        assert_eq!(*level, Level::ERROR);
        assert!(message.contains("method: GET"));
        assert!(message.contains("url: https://invitations-api.trustpilot.com/v1/private/business-units/bu-1/templates"));
        assert!(message.contains(r#""token":"***""#));
        assert!(!message.contains("secret-token"));
    }

    #[tokio::test]
    async fn post_failure_logs_body() {
        let logger = Arc::new(RecordingLogger::default());
        let client = client(Reply::Status(400)).with_logger(logger.clone());
        let context = ProductReviewInvitationContext::new("bu-1", "https://shop.example.com");

        let err = client.product_review_invitation(
            &context,
            &Recipient::new("jane@example.com", "Jane"),
            "order-42",
            &["p-1".to_string()],
            &[]
        ).await.unwrap_err();

        assert_eq!(err.code(), Some(400));

        let entries = logger.entries();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].1.contains("method: POST"));
        assert!(entries[0].1.contains(r#""productIds":["p-1"]"#));
    }

    #[tokio::test]
    async fn malformed_response_is_a_transport_error() {
        let client = client(Reply::Body("<html>"));

        let err = client.get_invitation_templates("bu-1").await.unwrap_err();

        assert!(matches!(
            err,
            InvitationError::Transport { code: None, source: TransportError::Decode(_), .. }
        ));
    }

    #[tokio::test]
    async fn empty_response_decodes_to_null() {
        let client = client(Reply::Body(""));

        let result = client.get_invitation_templates("bu-1").await.unwrap();

        assert_eq!(result, Value::Null);
    }

    #[tokio::test]
    async fn token_is_read_per_request() {
        struct Counting(Mutex<u32>);

        impl TokenProvider for Counting {
            fn token(&self) -> String {
                let mut n = self.0.lock().unwrap();
                *n += 1;
                format!("token-{n}")
            }
        }

        let client = InvitationClient::new(Counting(Mutex::new(0)))
            .with_transport(RecordingTransport::replying(Reply::Body("{}")));

        client.get_invitation_templates("bu-1").await.unwrap();
        client.get_invitation_templates("bu-1").await.unwrap();

        let requests = client.transport.requests();
        assert_eq!(query_value(&requests[0], "token"), Some("token-1"));
        assert_eq!(query_value(&requests[1], "token"), Some("token-2"));
    }

    #[test]
    fn request_options_mask_token() {
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: Url::parse("https://example.com/").unwrap(),
            query: vec![
                ("token".to_string(), "secret".to_string()),
                ("page".to_string(), "1".to_string())
            ],
            json: None
        };

        assert_eq!(request_options(&request), json!({
            "query": { "token": "***", "page": "1" }
        }));
    }
}
