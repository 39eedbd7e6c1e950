mod invitation_link_request;
mod invitation_request;

pub use invitation_link_request::*;
pub use invitation_request::*;
