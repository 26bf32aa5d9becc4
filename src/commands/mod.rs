//! Command implementations for the refbundle CLI

pub mod bundle;
