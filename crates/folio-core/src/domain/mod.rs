//! Domain entities - the core business objects.

mod portfolio;
mod user;

pub use portfolio::{
    decode_list, encode_list, Portfolio, PortfolioContent, Project, SocialLink, LIST_SEPARATOR,
};
pub use user::User;
