//! Component-interaction handlers, routed from `handler` by the first segment
//! of the interaction's `custom_id`.

pub mod wager_handler;
