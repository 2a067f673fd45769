//! Per-entity persistence over the injected storage collection
//!
//! Repositories assign ids and timestamps on create, merge partial updates,
//! and signal absence with `None`/`false` — never with errors. The cart
//! repository additionally owns the read-modify-write cycle for the item
//! merge operations.

pub mod accounts;
pub mod carts;
pub mod contacts;
pub mod users;

pub use accounts::AccountRepository;
pub use carts::CartRepository;
pub use contacts::ContactRepository;
pub use users::UserRepository;
