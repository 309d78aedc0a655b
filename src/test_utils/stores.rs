use std::sync::Mutex;

use crate::{
    category::{Category, CategoryName},
    expense::{Expense, ExpenseId, NewExpense},
    page_cache::{CachedView, InvalidateView},
    stores::{CategoryStore, ExpenseStore, StoreError, TagStore},
    tag::{Tag, TagName},
};

/// A store where every call fails as if the database lock was poisoned.
pub(crate) struct FailingStore;

impl CategoryStore for FailingStore {
    fn create(&self, _name: CategoryName) -> Result<Category, StoreError> {
        Err(StoreError::DatabaseLock)
    }

    fn get(&self, _id: &str) -> Result<Category, StoreError> {
        Err(StoreError::DatabaseLock)
    }

    fn get_all(&self) -> Result<Vec<Category>, StoreError> {
        Err(StoreError::DatabaseLock)
    }

    fn update(&self, _id: &str, _name: CategoryName) -> Result<(), StoreError> {
        Err(StoreError::DatabaseLock)
    }

    fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::DatabaseLock)
    }
}

impl TagStore for FailingStore {
    fn create(&self, _name: TagName) -> Result<Tag, StoreError> {
        Err(StoreError::DatabaseLock)
    }

    fn get(&self, _id: &str) -> Result<Tag, StoreError> {
        Err(StoreError::DatabaseLock)
    }

    fn get_all(&self) -> Result<Vec<Tag>, StoreError> {
        Err(StoreError::DatabaseLock)
    }

    fn update(&self, _id: &str, _name: TagName) -> Result<(), StoreError> {
        Err(StoreError::DatabaseLock)
    }

    fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::DatabaseLock)
    }
}

impl ExpenseStore for FailingStore {
    fn create(&self, _expense: NewExpense) -> Result<ExpenseId, StoreError> {
        Err(StoreError::DatabaseLock)
    }

    fn get(&self, _id: &str) -> Result<Expense, StoreError> {
        Err(StoreError::DatabaseLock)
    }

    fn get_all(&self) -> Result<Vec<Expense>, StoreError> {
        Err(StoreError::DatabaseLock)
    }

    fn update(&self, _id: &str, _expense: NewExpense) -> Result<(), StoreError> {
        Err(StoreError::DatabaseLock)
    }

    fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::DatabaseLock)
    }
}

/// Records every view it is asked to invalidate, in order.
#[derive(Debug, Default)]
pub(crate) struct RecordingInvalidator {
    views: Mutex<Vec<CachedView>>,
}

impl RecordingInvalidator {
    pub(crate) fn invalidated(&self) -> Vec<CachedView> {
        self.views.lock().unwrap().clone()
    }
}

impl InvalidateView for RecordingInvalidator {
    fn invalidate(&self, view: CachedView) {
        self.views.lock().unwrap().push(view);
    }
}
