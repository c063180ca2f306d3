//! Discovery providers.
//!
//! Each provider turns a topic into candidate records from one family of
//! sources. Providers never fail outward: network and parse problems are
//! logged and simply yield fewer results.

pub mod government;
pub mod international;
pub mod scholar;

pub use government::GovernmentProvider;
pub use international::InternationalProvider;
pub use scholar::ScholarProvider;
