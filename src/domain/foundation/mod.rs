//! Foundation module - shared domain primitives.

mod money;

pub use money::{kobo_to_naira, naira_to_kobo, Kobo, KOBO_PER_NAIRA};
