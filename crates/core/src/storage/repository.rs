use crate::errors::CoreError;

/// A persisted collection that is read and written as a whole.
///
/// Services take a `Repository` instead of touching storage directly, so the
/// calculations stay testable against a plain `Vec`.
pub trait Repository<T> {
    /// Every record in the collection, in stored order.
    fn list(&self) -> Result<Vec<T>, CoreError>;

    /// Add records at the end of the collection.
    fn append(&mut self, items: Vec<T>) -> Result<(), CoreError>;

    /// Overwrite the whole collection.
    fn replace(&mut self, items: Vec<T>) -> Result<(), CoreError>;
}

/// In-memory collection.
impl<T: Clone> Repository<T> for Vec<T> {
    fn list(&self) -> Result<Vec<T>, CoreError> {
        Ok(self.clone())
    }

    fn append(&mut self, items: Vec<T>) -> Result<(), CoreError> {
        self.extend(items);
        Ok(())
    }

    fn replace(&mut self, items: Vec<T>) -> Result<(), CoreError> {
        *self = items;
        Ok(())
    }
}
