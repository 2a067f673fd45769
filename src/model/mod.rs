//! Domain records and their create/update inputs
//!
//! All records serialize with camelCase field names, matching the JSON wire
//! format of the HTTP surface and the SDK.

pub mod account;
pub mod cart;
pub mod contact;
pub mod user;

pub use account::{Account, Address, CreateAccountInput, UpdateAccountInput};
pub use cart::{AddItemInput, Cart, CartItem, CreateCartInput, RemoveItemInput};
pub use contact::{Contact, CreateContactInput, UpdateContactInput};
pub use user::{LoginInput, RegisterInput, User, UserSummary};
