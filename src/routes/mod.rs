/// Router Module Index
///
/// Organizes the application's routing logic into access-segregated modules.
/// Access control is applied explicitly at the module level (via Axum layers),
/// preventing accidental exposure of protected endpoints.

/// Routes accessible to all clients (anonymous, plus the register/login
/// gateway functions).
pub mod public;

/// Routes protected by the authentication gate. Require a session that holds
/// a valid access token.
pub mod authenticated;
