// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Credential verification, session tokens, and request gating.
//!
//! ## Auth Flow
//!
//! 1. Client POSTs email + password to `/v1/session`
//! 2. `CredentialVerifier` checks the password against the stored
//!    pbkdf2-sha256 hash (with a dummy verification when the email is
//!    unknown, so timing does not reveal which emails exist)
//! 3. `TokenService` issues an HS256 JWT `{sub, iat, exp}` with a
//!    60-minute lifetime, returned in the body and as the `auth_token`
//!    cookie
//! 4. Protected handlers take the `Auth` extractor, which validates the
//!    token from the cookie or `Authorization: Bearer` header
//!
//! ## Security
//!
//! - Tokens are stateless: validity is signature + expiry only. Logout
//!   clears the client cookie; a captured token stays valid until expiry.
//! - The signing secret is fixed at startup and injected into the
//!   `TokenService`; rotating it invalidates all outstanding tokens.
//! - Expired, malformed, absent, and tampered tokens all produce the same
//!   401 response.

pub mod claims;
pub mod error;
pub mod extractor;
pub mod password;
pub mod token;

pub use claims::AuthenticatedUser;
pub use error::AuthError;
pub use extractor::Auth;
pub use password::{CredentialVerifier, VerifiedCredentials};
pub use token::{TokenError, TokenService};
