//! # services
//!
//! Business rules for Commune. Each service owns one entity family and talks
//! to storage and auth only through the ports defined in `domains`.

pub mod comments;
pub mod communities;
pub mod membership;
pub mod users;
pub mod validation;

pub use comments::CommentService;
pub use communities::{CommunityService, CreateCommunity};
pub use membership::{JoinCommunity, MembershipService};
pub use users::{SignUp, SignUpOutcome, UserService};
