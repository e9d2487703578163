//! Session credential types and authentication request payloads.

mod dto;
mod token;

pub use dto::{
    ForgotPasswordRequest, LoginRequest, LogoutRequest, RefreshRequest, RegisterRequest,
    ResendVerificationRequest, ResetPasswordRequest, SessionProfile,
};
pub use token::{TokenPair, decode_access_exp};
