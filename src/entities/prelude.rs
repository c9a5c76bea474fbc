pub use super::documents::Entity as Documents;
