/// Statistics over loaded datasets. Nothing here draws or prints.
///
/// ```text
///   Dataset ──► accounts::to_unique_accounts ──► AccountRecord[]
///      │                                              │
///      ├─► accounts::filter_has_field                 ├─► comparison  (box summaries)
///      │                                              ├─► proportions (human / bot)
///      └──────────────────────────────────────────────┴─► summary     (headline numbers)
/// ```
pub mod accounts;
pub mod comparison;
pub mod proportions;
pub mod stats;
pub mod summary;
