// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{CustomOption, Gender, NewProfile, Profile, ProfileStats, User};
pub use requests::{
    CustomOptionRequest, LoginRequest, MatchRequest, ProfileSearchQuery, UpdateEmailRequest,
    UpdatePasswordRequest,
};
pub use responses::{
    DatabaseHealthResponse, ErrorResponse, InputProfileEcho, MatchResponse, MessageResponse,
    SessionResponse, SessionUser,
};
