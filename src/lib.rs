mod access_token;
mod api_client;
mod client;
mod config;
mod error;
mod invitation;
mod json;
mod logger;
mod product_review;

pub use {
    access_token::{AccessToken, TokenProvider},
    api_client::{HttpMethod, HttpRequest, ReqwestTransport, Transport},
    client::InvitationClient,
    config::{ClientConfig, Endpoint, API_ENDPOINT, INVITATIONS_ENDPOINT},
    error::{InvitationError, TransportError},
    invitation::{InvitationContext, Recipient, Sender, DEFAULT_LOCALE},
    logger::{Logger, NoopLogger, TracingLogger},
    product_review::{Product, ProductReviewInvitationContext, ProductReviewsQuery}
};
