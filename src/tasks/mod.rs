//! Task list: a registry of [entities::Task] records with create, status change and delete
//! operations, plus filtered and sorted views over it.

pub mod entities;
pub mod registry;
pub mod samples;
pub mod view;
