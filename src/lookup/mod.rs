/// Lookup domain - commands, MISP records and the rules for rendering them
///
/// Everything in this module is pure: no I/O, no configuration lookups.
pub mod domain;
pub mod policies;
pub mod services;
