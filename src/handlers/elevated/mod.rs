// Admin-only views. The admin gate runs in middleware; these handlers are
// plain listings with no per-row checks.
pub mod audit;
pub mod tracks;
pub mod users;
