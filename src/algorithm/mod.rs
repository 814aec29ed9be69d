/// Per-cell alternate history with cursor navigation
pub mod history;
/// Signature matching with cooldown and exclusion variants
pub mod matcher;
