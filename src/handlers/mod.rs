// Three security tiers:
// public (no auth) -> protected (resolved Principal) -> elevated (admin gate)
pub mod elevated;
pub mod protected;
pub mod public;
